pub mod column;
pub mod config;
pub mod data_type;
pub mod database;
pub mod error;
pub mod schema;
pub mod table;
pub mod value;

pub use column::Column;
pub use config::{ColumnConfig, DatabaseConfig, TableConfig};
pub use data_type::DataType;
pub use database::{Database, TableRef};
pub use error::{ConfigError, Constraint, DbError, Result, SchemaError, ValidationError, ValueError};
pub use schema::{ColumnConstraints, ColumnDef, Schema};
pub use table::{Record, Table};
pub use value::Value;
