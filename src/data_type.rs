use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the supported data types in a table schema.
/// These types define the structure of columns and the expected kind of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// A 64-bit signed integer. Every integer width is normalized to this form.
    #[serde(alias = "integer")]
    Int,
    /// A variable-length UTF-8 character string.
    #[serde(alias = "string")]
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
        }
    }
}
