use std::collections::HashSet;

use crate::data_type::DataType;
use crate::error::{Constraint, SchemaError, ValidationError};
use crate::value::Value;

/// Rules checked against a column value on insert.
///
/// Constraints compose; a column may carry any combination that applies to
/// its type.
///
/// ```
/// # use memtable::ColumnConstraints;
/// let id = ColumnConstraints::required().with_min_value(1024);
/// assert!(id.required);
/// assert_eq!(id.min_value, Some(1024));
/// assert_eq!(id.max_length, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnConstraints {
    /// The column must be present and non-null in every record.
    pub required: bool,
    /// Maximum length in bytes of the UTF-8 text. Text columns only.
    pub max_length: Option<usize>,
    /// Smallest accepted value. Integer columns only.
    pub min_value: Option<i64>,
}

impl ColumnConstraints {
    /// No constraint at all: an optional column.
    pub fn none() -> Self {
        Self::default()
    }

    /// A mandatory column.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_min_value(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }
}

/// Column definition in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub constraints: ColumnConstraints,
}

impl ColumnDef {
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        constraints: ColumnConstraints,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints,
        }
    }

    /// Checks a candidate value against this column's type and constraints.
    ///
    /// # Errors
    /// - [ValidationError::RequiredFieldMissing] if the value is `Null` and the column is
    ///   required.
    /// - [ValidationError::TypeMismatch] if the value kind differs from the column type.
    /// - [ValidationError::ConstraintViolation] if a correctly typed value breaks
    ///   `max_length` or `min_value`.
    ///
    /// # Example
    /// ```
    /// # use memtable::{ColumnConstraints, ColumnDef, DataType, Value};
    /// let constraints = ColumnConstraints::required().with_max_length(5);
    /// let name = ColumnDef::new("name", DataType::Text, constraints);
    ///
    /// assert!(name.validate(&Value::from("abc")).is_ok());
    /// assert!(name.validate(&Value::from("abcdef")).is_err());
    /// assert!(name.validate(&Value::Null).is_err());
    /// ```
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match (self.data_type, value) {
            (_, Value::Null) => {
                if self.constraints.required {
                    return Err(ValidationError::RequiredFieldMissing(self.name.clone()));
                }
                Ok(())
            }
            (DataType::Text, Value::Text(s)) => match self.constraints.max_length {
                // byte length, not character count
                Some(max) if s.len() > max => Err(self.violation(Constraint::MaxLength(max))),
                _ => Ok(()),
            },
            (DataType::Int, Value::Int(i)) => match self.constraints.min_value {
                Some(min) if *i < min => Err(self.violation(Constraint::MinValue(min))),
                _ => Ok(()),
            },
            (expected, _) => Err(ValidationError::TypeMismatch {
                column: self.name.clone(),
                expected,
            }),
        }
    }

    fn violation(&self, rule: Constraint) -> ValidationError {
        ValidationError::ConstraintViolation {
            column: self.name.clone(),
            rule,
        }
    }

    /// Rejects constraints that do not apply to the declared type.
    fn check_constraints(&self) -> Result<(), SchemaError> {
        let misplaced = match self.data_type {
            DataType::Int => self.constraints.max_length.map(Constraint::MaxLength),
            DataType::Text => self.constraints.min_value.map(Constraint::MinValue),
        };
        match misplaced {
            Some(rule) => Err(SchemaError::ConstraintTypeMismatch {
                column: self.name.clone(),
                data_type: self.data_type,
                rule,
            }),
            None => Ok(()),
        }
    }
}

/// Ordered, immutable set of column definitions owned by a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnDef>,
}

impl Schema {
    /// Builds a schema, checking that column names are non-empty and unique
    /// and that every constraint matches its column type.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.is_empty() {
                return Err(SchemaError::EmptyColumnName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }
            column.check_constraints()?;
        }
        Ok(Self { columns })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
