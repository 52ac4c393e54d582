//! Error types returned by the store.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::data_type::DataType;

/// Result alias used by the database-level API.
pub type Result<T> = std::result::Result<T, DbError>;

/// Top-level error returned by [crate::Database] operations.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("table {0:?} already exists")]
    TableAlreadyExists(String),

    #[error("table {0:?} not found")]
    TableNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid schema for table {table:?}: {source}")]
    InvalidSchema {
        table: String,
        #[source]
        source: SchemaError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The rule a correctly typed value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    MaxLength(usize),
    MinValue(i64),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxLength(n) => write!(f, "max length {n}"),
            Self::MinValue(n) => write!(f, "min value {n}"),
        }
    }
}

/// A record rejected by a table schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("column {0:?} is required")]
    RequiredFieldMissing(String),

    #[error("expected {expected} for column {column:?}")]
    TypeMismatch { column: String, expected: DataType },

    #[error("value for column {column:?} violates {rule}")]
    ConstraintViolation { column: String, rule: Constraint },

    #[error("unknown column {0:?}")]
    UnknownColumn(String),
}

/// A column list that cannot form a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("table name is empty")]
    EmptyTableName,

    #[error("a table needs at least one column")]
    NoColumns,

    #[error("column name is empty")]
    EmptyColumnName,

    #[error("column {0:?} is declared twice")]
    DuplicateColumn(String),

    #[error("column {column:?} of type {data_type} cannot carry {rule}")]
    ConstraintTypeMismatch {
        column: String,
        data_type: DataType,
        rule: Constraint,
    },
}

/// Failure while loading a [crate::DatabaseConfig].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// An input that cannot be represented as a [crate::Value].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("integer {0} does not fit in 64 signed bits")]
    IntegerOverflow(String),
}
