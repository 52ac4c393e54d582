use memtable::{
    ColumnConstraints, ColumnDef, DataType, Database, DatabaseConfig, DbError, Record, Value,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DbError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // an optional TOML file declares tables up front
    let db = match std::env::args().nth(1) {
        Some(path) => Database::from_config(&DatabaseConfig::from_file(path)?)?,
        None => Database::new(),
    };

    if db.get_table("users").is_err() {
        db.create_table(
            "users",
            vec![
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
            ],
        )?;
    }

    db.insert_record(
        "users",
        Record::from([
            ("id".to_string(), Value::from(1030)),
            ("username".to_string(), Value::from("hi.there@gmail.com")),
        ]),
    )?;

    let too_small = Record::from([
        ("id".to_string(), Value::from(7u8)),
        ("username".to_string(), Value::from("nope")),
    ]);
    if let Err(err) = db.insert_record("users", too_small) {
        error!("insert refused: {err}");
    }

    info!("all records:");
    for record in db.get_records("users", &Record::new())? {
        let mut fields: Vec<_> = record.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        println!("{fields:?}");
    }

    Ok(())
}
