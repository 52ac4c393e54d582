use crate::{
    config::DatabaseConfig,
    error::{DbError, Result, SchemaError},
    schema::{ColumnDef, Schema},
    table::{Record, Table},
};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Read-only handle to a table. The database read lock is held while it lives.
pub type TableRef<'a> = MappedRwLockReadGuard<'a, Table>;

/// The main entry point for the in-memory store.
/// It owns a collection of tables and serializes access to them.
///
/// All tables sit behind one reader/writer lock. Table creation, deletion and every
/// write take it exclusively for the whole operation, validation included; reads
/// share it. Writers to different tables therefore wait on each other.
///
/// `Database` is `Send + Sync`; wrap it in an `Arc` to share it between threads.
#[derive(Default)]
pub struct Database {
    /// A map of table names to their respective [Table] structures.
    tables: RwLock<HashMap<String, Table>>,
}

impl Database {
    /// Creates a new, empty database instance.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::default()),
        }
    }

    /// Creates a database holding every table listed in `config`.
    ///
    /// # Errors
    /// Fails on the first table that cannot be created (duplicate name or invalid schema).
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::new();
        for table in &config.tables {
            db.create_table(table.name.clone(), table.column_defs())?;
        }
        Ok(db)
    }

    /// Creates a new table in the database.
    ///
    /// # Errors
    /// - [DbError::InvalidSchema] if the name is empty or the columns do not form a valid
    ///   schema.
    /// - [DbError::TableAlreadyExists] if a table with the same name already exists.
    pub fn create_table(&self, name: impl Into<String>, columns: Vec<ColumnDef>) -> Result<()> {
        let name = name.into();
        let schema = if name.is_empty() {
            Err(SchemaError::EmptyTableName)
        } else {
            Schema::new(columns)
        }
        .map_err(|source| DbError::InvalidSchema {
            table: name.clone(),
            source,
        })?;

        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(DbError::TableAlreadyExists(name));
        }
        let table = Table::new(name.clone(), schema);
        tables.insert(name.clone(), table);
        info!(table = %name, "table created");
        Ok(())
    }

    /// Retrieves a handle to a table by name.
    ///
    /// The handle keeps a shared lock on the database until it is dropped. Writers on
    /// other threads block meanwhile, and a write from the thread holding the handle
    /// (`insert_record`, `delete_table`, ...) deadlocks because the lock is not
    /// re-entrant. Use [Database::get_schema] to inspect a table without holding it.
    pub fn get_table(&self, name: &str) -> Result<TableRef<'_>> {
        RwLockReadGuard::try_map(self.tables.read(), |tables| tables.get(name))
            .map_err(|_| DbError::TableNotFound(name.to_string()))
    }

    /// Returns a copy of a table's schema. The lock is released before returning.
    pub fn get_schema(&self, name: &str) -> Result<Schema> {
        Ok(self.get_table(name)?.schema.clone())
    }

    /// Removes a table and all its rows from the database.
    ///
    /// # Errors
    /// Returns [DbError::TableNotFound] if the table does not exist.
    pub fn delete_table(&self, name: &str) -> Result<()> {
        match self.tables.write().remove(name) {
            Some(table) => {
                info!(table = %name, rows = table.len(), "table deleted");
                Ok(())
            }
            None => Err(DbError::TableNotFound(name.to_string())),
        }
    }

    /// Returns the names of all tables, sorted.
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of rows stored in a table.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        Ok(self.get_table(table)?.len())
    }

    /// Validates `record` against the table schema and appends it.
    ///
    /// # Errors
    /// Returns [DbError::TableNotFound] if the table does not exist, or the table's
    /// [crate::ValidationError] wrapped in [DbError::Validation]. A failed insert stores
    /// nothing.
    ///
    /// # Example
    /// ```
    /// use memtable::{ColumnConstraints, ColumnDef, DataType, Database, Record, Value};
    ///
    /// let db = Database::new();
    /// db.create_table(
    ///     "users",
    ///     vec![
    ///         ColumnDef::new(
    ///             "id",
    ///             DataType::Int,
    ///             ColumnConstraints::required().with_min_value(1024),
    ///         ),
    ///         ColumnDef::new(
    ///             "username",
    ///             DataType::Text,
    ///             ColumnConstraints::required().with_max_length(20),
    ///         ),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// let record = Record::from([
    ///     ("id".to_string(), Value::from(1030)),
    ///     ("username".to_string(), Value::from("hi.there")),
    /// ]);
    /// db.insert_record("users", record.clone()).unwrap();
    ///
    /// assert_eq!(db.get_records("users", &Record::new()).unwrap(), vec![record]);
    /// ```
    pub fn insert_record(&self, table: &str, record: Record) -> Result<()> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;

        target.insert(record).map_err(|err| {
            warn!(table = %table, error = %err, "record rejected");
            DbError::from(err)
        })
    }

    /// Returns the rows of `table` matching every pair of `filter`, in insertion order.
    /// An empty filter returns every row; no match is an empty vector, not an error.
    ///
    /// # Errors
    /// Returns [DbError::TableNotFound] if the table does not exist.
    pub fn get_records(&self, table: &str, filter: &Record) -> Result<Vec<Record>> {
        let tables = self.tables.read();
        let target = tables
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;

        let rows = target.scan(filter);
        debug!(
            table = %table,
            filters = filter.len(),
            matched = rows.len(),
            "records scanned"
        );
        Ok(rows)
    }

    /// Removes the rows of `table` matching `filter` and returns how many went away.
    /// An empty filter empties the table.
    ///
    /// # Errors
    /// Returns [DbError::TableNotFound] if the table does not exist.
    pub fn delete_records(&self, table: &str, filter: &Record) -> Result<usize> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;

        let removed = target.delete_where(filter);
        debug!(table = %table, removed, "records deleted");
        Ok(removed)
    }
}
