//! Declarative table definitions.
//!
//! A config file lists the tables to create when a [crate::Database] starts:
//!
//! ```toml
//! [[tables]]
//! name = "users"
//! columns = [
//!     { name = "id", type = "int", required = true, min_value = 1024 },
//!     { name = "username", type = "text", required = true, max_length = 20 },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data_type::DataType;
use crate::error::ConfigError;
use crate::schema::{ColumnConstraints, ColumnDef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
}

/// One column entry of a table config. Unknown keys are rejected so a misspelled
/// constraint fails to load instead of leaving the column unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min_value: Option<i64>,
}

impl From<ColumnConfig> for ColumnDef {
    fn from(config: ColumnConfig) -> Self {
        ColumnDef::new(
            config.name,
            config.data_type,
            ColumnConstraints {
                required: config.required,
                max_length: config.max_length,
                min_value: config.min_value,
            },
        )
    }
}

impl TableConfig {
    pub fn column_defs(&self) -> Vec<ColumnDef> {
        self.columns.iter().cloned().map(ColumnDef::from).collect()
    }
}

impl DatabaseConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
