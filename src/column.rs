use std::sync::Arc;

use crate::data_type::DataType;
use crate::error::ValidationError;
use crate::value::Value;
use bitvec::prelude::*;

/// Physical storage for column data.
/// Each variant wraps a collection of a specific type to ensure contiguous memory
/// allocation (columnar storage).
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Vector of 64-bit integers.
    Int(Vec<i64>),
    /// Vector of thread-safe atomic reference-counted strings.
    Text(Vec<Arc<str>>),
}

/// Stored values of one schema column.
/// It combines metadata (name, type) with actual data and a tracker for rows where the
/// column was not supplied.
#[derive(Debug, Clone)]
pub struct Column {
    /// The name of the column.
    pub name: String,
    /// The logical data type of the column.
    pub data_type: DataType,
    /// The actual values stored in the column.
    pub data: ColumnData,
    /// A bitmap where a `true` bit means the row has no value for this column.
    pub null_bitmap: BitVec,
}

impl Column {
    /// Creates a new, empty column with the specified name and data type.
    /// The underlying data storage is initialized according to the data type.
    pub fn new(name: String, data_type: DataType) -> Self {
        let data = match data_type {
            DataType::Int => ColumnData::Int(vec![]),
            DataType::Text => ColumnData::Text(vec![]),
        };
        Self {
            name,
            data_type,
            data,
            null_bitmap: bitvec!(),
        }
    }

    /// Appends a new value to the end of the column.
    ///
    /// # Errors
    /// Returns [ValidationError::TypeMismatch] if the value's type does not match the
    /// column's data type. Nothing is appended in that case.
    ///
    /// # Behavior
    /// - If the value is `Null`, a placeholder is pushed to the data vector
    ///   to maintain index alignment with the `null_bitmap`.
    /// - Otherwise the value is added to the data vector and the bitmap is updated.
    ///
    /// # Example
    /// ```
    /// # use memtable::column::Column;
    /// # use memtable::{DataType, Value};
    /// let mut col = Column::new("age".into(), DataType::Int);
    /// col.push(Value::Int(30)).unwrap();
    /// col.push(Value::Null).unwrap();
    ///
    /// assert_eq!(col.len(), 2);
    /// assert!(col.get(1).unwrap().is_null());
    /// ```
    pub fn push(&mut self, value: Value) -> Result<(), ValidationError> {
        match (&mut self.data, value) {
            (ColumnData::Int(col), Value::Null) => col.push(0),
            (ColumnData::Text(col), Value::Null) => col.push(Arc::from("")),
            (ColumnData::Int(col), Value::Int(v)) => {
                col.push(v);
                self.null_bitmap.push(false);
                return Ok(());
            }
            (ColumnData::Text(col), Value::Text(v)) => {
                col.push(v);
                self.null_bitmap.push(false);
                return Ok(());
            }
            _ => {
                return Err(ValidationError::TypeMismatch {
                    column: self.name.clone(),
                    expected: self.data_type,
                });
            }
        }
        self.null_bitmap.push(true);
        Ok(())
    }

    /// Returns the number of rows currently stored in the column.
    pub fn len(&self) -> usize {
        self.null_bitmap.len()
    }

    /// Returns true if there is no row in the column, else false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the specified row index.
    ///
    /// Returns `Some(Value)` if the index is valid, or `None` if it is out of bounds.
    /// If the `null_bitmap` marks the row, `Some(Value::Null)` is returned.
    pub fn get(&self, row_idx: usize) -> Option<Value> {
        if row_idx >= self.len() {
            return None;
        }
        if self.null_bitmap[row_idx] {
            return Some(Value::Null);
        }
        match &self.data {
            ColumnData::Int(col) => Some(Value::Int(col[row_idx])),
            ColumnData::Text(col) => Some(Value::Text(Arc::clone(&col[row_idx]))),
        }
    }

    /// Compares the stored value at `row_idx` with `expected` without cloning it.
    ///
    /// A row without a value never matches, not even `Value::Null`.
    pub fn matches(&self, row_idx: usize, expected: &Value) -> bool {
        if row_idx >= self.len() || self.null_bitmap[row_idx] {
            return false;
        }
        match (&self.data, expected) {
            (ColumnData::Int(col), Value::Int(v)) => col[row_idx] == *v,
            (ColumnData::Text(col), Value::Text(v)) => *col[row_idx] == **v,
            _ => false,
        }
    }

    /// Remove the value at the specified row index.
    ///
    /// Returns `false` if the index is out of bounds.
    pub fn remove(&mut self, row_idx: usize) -> bool {
        if self.len() <= row_idx {
            return false;
        }
        match &mut self.data {
            ColumnData::Int(col) => {
                col.remove(row_idx);
            }
            ColumnData::Text(col) => {
                col.remove(row_idx);
            }
        }
        self.null_bitmap.remove(row_idx);
        true
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        match &mut self.data {
            ColumnData::Int(col) => col.clear(),
            ColumnData::Text(col) => col.clear(),
        }
        self.null_bitmap.clear();
    }
}
