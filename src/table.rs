use std::collections::HashMap;

use tracing::debug;

use crate::column::Column;
use crate::error::ValidationError;
use crate::schema::Schema;
use crate::value::Value;

/// A row as seen by callers: column name to value.
///
/// Columns the row has no value for are missing keys, never `Value::Null`.
pub type Record = HashMap<String, Value>;

#[derive(Debug)]
pub struct Table {
    pub name: String,
    pub schema: Schema,
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Table {
    pub fn new(name: String, schema: Schema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|column| Column::new(column.name.clone(), column.data_type))
            .collect();
        Self {
            name,
            schema,
            columns,
            row_count: 0,
        }
    }

    /// Validates a record against the schema and appends it.
    ///
    /// Every declared column is checked first, in schema order; keys naming no
    /// column are checked afterwards, smallest name first. The row is stored only
    /// when both passes succeed, so a rejected record leaves the table untouched.
    ///
    /// An explicit `Value::Null` on an optional column is stored as a missing value.
    pub fn insert(&mut self, mut record: Record) -> Result<(), ValidationError> {
        let mut row = Vec::with_capacity(self.columns.len());
        for def in &self.schema.columns {
            match record.remove(&def.name) {
                None if def.constraints.required => {
                    return Err(ValidationError::RequiredFieldMissing(def.name.clone()));
                }
                None => row.push(Value::Null),
                Some(value) => {
                    def.validate(&value)?;
                    row.push(value);
                }
            }
        }

        // whatever is left in the record is not part of the schema
        if let Some(unknown) = record.into_keys().min() {
            return Err(ValidationError::UnknownColumn(unknown));
        }

        // types were checked above, so no push can fail halfway through the row
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.push(value)?;
        }
        self.row_count += 1;
        debug!(table = %self.name, rows = self.row_count, "row appended");
        Ok(())
    }

    /// Returns the rows matching every `(column, value)` pair of `filter`, in insertion
    /// order. An empty filter returns all rows.
    ///
    /// A filter key naming no column, or a `Value::Null` filter value, matches no row.
    pub fn scan(&self, filter: &Record) -> Vec<Record> {
        self.matching_rows(filter)
            .into_iter()
            .map(|row_idx| self.record_at(row_idx))
            .collect()
    }

    /// Removes the rows matching `filter` and returns how many were removed.
    /// An empty filter removes every row.
    pub fn delete_where(&mut self, filter: &Record) -> usize {
        if filter.is_empty() {
            let removed = self.row_count;
            self.columns.iter_mut().for_each(Column::clear);
            self.row_count = 0;
            return removed;
        }

        let mut rows = self.matching_rows(filter);
        // remove from the back so pending indexes stay valid
        rows.sort_unstable_by(|a, b| b.cmp(a));
        for &row_idx in &rows {
            for column in &mut self.columns {
                column.remove(row_idx);
            }
        }
        self.row_count -= rows.len();
        rows.len()
    }

    pub fn get_row(&self, row_idx: usize) -> Option<Record> {
        if self.row_count <= row_idx {
            return None;
        }
        Some(self.record_at(row_idx))
    }

    pub fn get_col(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    fn matching_rows(&self, filter: &Record) -> Vec<usize> {
        let predicates: Option<Vec<(&Column, &Value)>> = filter
            .iter()
            .map(|(name, expected)| self.get_col(name).map(|col| (col, expected)))
            .collect();
        let Some(predicates) = predicates else {
            return Vec::new();
        };

        (0..self.row_count)
            .filter(|&row_idx| {
                predicates
                    .iter()
                    .all(|(col, expected)| col.matches(row_idx, expected))
            })
            .collect()
    }

    fn record_at(&self, row_idx: usize) -> Record {
        self.columns
            .iter()
            .filter_map(|col| match col.get(row_idx) {
                Some(Value::Null) | None => None,
                Some(value) => Some((col.name.clone(), value)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::error::Constraint;
    use crate::schema::{ColumnConstraints, ColumnDef};

    fn users_schema() -> Schema {
        Schema::new(vec![
            ColumnDef::new(
                "id",
                DataType::Int,
                ColumnConstraints::required().with_min_value(1024),
            ),
            ColumnDef::new(
                "username",
                DataType::Text,
                ColumnConstraints::required().with_max_length(20),
            ),
            ColumnDef::new("bio", DataType::Text, ColumnConstraints::none()),
        ])
        .unwrap()
    }

    fn record<const N: usize>(pairs: [(&str, Value); N]) -> Record {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_table_creation() {
        let table = Table::new("users".into(), users_schema());
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.row_count, 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_and_scan_round_trip() {
        let mut table = Table::new("users".into(), users_schema());
        let row = record([
            ("id", Value::from(1030)),
            ("username", Value::from("hi.there@gmail.com")),
            ("bio", Value::from("hello")),
        ]);

        table.insert(row.clone()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.scan(&row), vec![row.clone()]);
        assert_eq!(table.get_row(0), Some(row));
        assert_eq!(table.get_row(1), None);
    }

    #[test]
    fn test_optional_column_is_missing_key() {
        let mut table = Table::new("users".into(), users_schema());

        table
            .insert(record([("id", Value::from(1024)), ("username", Value::from("a"))]))
            .unwrap();
        table
            .insert(record([
                ("id", Value::from(2048)),
                ("username", Value::from("b")),
                ("bio", Value::Null),
            ]))
            .unwrap();

        for row in table.scan(&Record::new()) {
            assert!(!row.contains_key("bio"));
        }
    }

    #[test]
    fn test_required_missing_leaves_table_unchanged() {
        let mut table = Table::new("users".into(), users_schema());

        let err = table
            .insert(record([("id", Value::from(1024))]))
            .unwrap_err();
        assert_eq!(err, ValidationError::RequiredFieldMissing("username".into()));

        let err = table
            .insert(record([("id", Value::Null), ("username", Value::from("x"))]))
            .unwrap_err();
        assert_eq!(err, ValidationError::RequiredFieldMissing("id".into()));

        assert_eq!(table.len(), 0);
        assert!(table.columns.iter().all(Column::is_empty));
    }

    #[test]
    fn test_unknown_column() {
        let mut table = Table::new("users".into(), users_schema());

        let err = table
            .insert(record([
                ("id", Value::from(1024)),
                ("username", Value::from("x")),
                ("zeta", Value::from(1)),
                ("email", Value::from("x@y")),
            ]))
            .unwrap_err();

        assert_eq!(err, ValidationError::UnknownColumn("email".into()));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_declared_columns_checked_before_unknown_keys() {
        let mut table = Table::new("users".into(), users_schema());

        let err = table
            .insert(record([("id", Value::from(1024)), ("email", Value::from("x@y"))]))
            .unwrap_err();

        assert_eq!(err, ValidationError::RequiredFieldMissing("username".into()));
    }

    #[test]
    fn test_constraint_violations() {
        let mut table = Table::new("users".into(), users_schema());

        let err = table
            .insert(record([("id", Value::from(1023)), ("username", Value::from("x"))]))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConstraintViolation {
                column: "id".into(),
                rule: Constraint::MinValue(1024),
            }
        );

        let err = table
            .insert(record([("id", Value::from("1024")), ("username", Value::from("x"))]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));

        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_scan_filters() {
        let mut table = Table::new("users".into(), users_schema());
        for (id, name) in [(1024, "alice"), (2048, "bob"), (4096, "alice")] {
            table
                .insert(record([("id", Value::from(id)), ("username", Value::from(name))]))
                .unwrap();
        }

        let all = table.scan(&Record::new());
        let ids: Vec<_> = all.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![Value::Int(1024), Value::Int(2048), Value::Int(4096)]);

        let rows = table.scan(&record([("id", Value::from(1024))]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["username"], Value::from("alice"));

        let rows = table.scan(&record([("username", Value::from("alice"))]));
        assert_eq!(rows.len(), 2);

        let rows = table.scan(&record([
            ("username", Value::from("alice")),
            ("id", Value::from(4096)),
        ]));
        assert_eq!(rows.len(), 1);

        assert!(table.scan(&record([("id", Value::from(1))])).is_empty());
        assert!(table.scan(&record([("bio", Value::from("x"))])).is_empty());
        assert!(table.scan(&record([("bio", Value::Null)])).is_empty());
        assert!(table.scan(&record([("missing", Value::from(1))])).is_empty());
    }

    #[test]
    fn test_delete_where() {
        let mut table = Table::new("users".into(), users_schema());
        for (id, name) in [(1024, "alice"), (2048, "bob"), (4096, "alice")] {
            table
                .insert(record([("id", Value::from(id)), ("username", Value::from(name))]))
                .unwrap();
        }

        assert_eq!(table.delete_where(&record([("username", Value::from("alice"))])), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_row(0).unwrap()["id"], Value::Int(2048));

        assert_eq!(table.delete_where(&record([("id", Value::from(1))])), 0);
        assert_eq!(table.delete_where(&Record::new()), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_get_col() {
        let table = Table::new("users".into(), users_schema());

        assert!(table.get_col("id").is_some());
        assert!(table.get_col("username").is_some());
        assert!(table.get_col("age").is_none());
    }
}
