//! SQLite schema and migrations for the task database.

use rusqlite::{Connection, types::Type};

/// Latest schema version understood by this binary.
pub const LATEST_SCHEMA_VERSION: u32 = 2;

/// Base table. `tags` holds a JSON array of normalized tag strings.
pub const MIGRATION_V1_SQL: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '[]',
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
";

/// Due dates, stored as `YYYY-MM-DD` or NULL
pub const MIGRATION_V2_SQL: &str = "
ALTER TABLE tasks ADD COLUMN due TEXT;
";

const MIGRATIONS: &[(u32, &str)] = &[(1, MIGRATION_V1_SQL), (2, MIGRATION_V2_SQL)];

/// Read `PRAGMA user_version` as a `u32`.
pub fn current_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    u32::try_from(version).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(error))
    })
}

/// Apply all pending migrations in ascending order, each in its own
/// transaction. Returns the resulting schema version.
pub fn migrate(conn: &mut Connection) -> rusqlite::Result<u32> {
    let mut current = current_schema_version(conn)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", i64::from(*version))?;
        tx.commit()?;
        tracing::debug!(version, "applied schema migration");
        current = *version;
    }

    Ok(current)
}
