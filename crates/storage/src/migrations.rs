//! Database migrations

use rusqlite::Connection;

use crate::StorageError;

pub const SCHEMA_VERSION: i32 = 1;

pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::debug!(
        "Series store schema version: {} (target: {})",
        current_version,
        SCHEMA_VERSION
    );

    if current_version > SCHEMA_VERSION {
        return Err(StorageError::Migration(format!(
            "store schema version {current_version} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    if current_version < 1 {
        tracing::info!("Running migration v1: initial schema");
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS archive (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                counter TEXT NOT NULL,
                step INTEGER NOT NULL,
                heartbeat INTEGER NOT NULL,
                retention INTEGER NOT NULL,
                last_update INTEGER
            );

            CREATE TABLE IF NOT EXISTS samples (
                ts INTEGER PRIMARY KEY,
                value INTEGER NOT NULL
            );

            PRAGMA user_version = 1;
            "#,
        )?;
    }

    Ok(())
}
