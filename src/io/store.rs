//! Task persistence.
//!
//! The board only talks to storage through [`TaskStore`]. [`SqliteStore`] is
//! the embedded implementation used by the binary:
//! - `journal_mode = WAL` and a busy timeout so a second `lb` on the same
//!   file does not fail immediately
//! - schema versioned through `PRAGMA user_version` (see [`super::schema`])

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, ToSql, params};

use super::schema;
use crate::model::task::{Status, Task, TaskId, normalize_tags};

/// Busy timeout applied to every connection.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt task row {id}: {reason}")]
    CorruptRow { id: TaskId, reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Persistence contract consumed by the board.
///
/// Every update and delete fails with [`StoreError::NotFound`] when `id` is
/// not present. Every mutation refreshes `updated_at`.
pub trait TaskStore: Send {
    fn create_task(&mut self, title: &str, status: Status) -> Result<Task, StoreError>;
    /// All tasks, in no particular order
    fn get_all_tasks(&self) -> Result<Vec<Task>, StoreError>;
    fn update_title(&mut self, id: TaskId, title: &str, status: Status)
    -> Result<(), StoreError>;
    fn update_status(&mut self, id: TaskId, status: Status) -> Result<(), StoreError>;
    fn update_description(&mut self, id: TaskId, text: &str) -> Result<(), StoreError>;
    /// Tags are normalized before they are written
    fn update_tags(&mut self, id: TaskId, tags: &[String]) -> Result<(), StoreError>;
    fn update_due(&mut self, id: TaskId, due: Option<NaiveDate>) -> Result<(), StoreError>;
    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError>;
}

/// SQLite-backed [`TaskStore`]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories
    /// and applying pending migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_connection(conn).map_err(|e| match e {
            StoreError::Sqlite(source) => StoreError::Open {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), "opened task database");
        Ok(store)
    }

    /// A throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StoreError> {
        configure_connection(&conn)?;
        schema::migrate(&mut conn)?;
        Ok(SqliteStore { conn })
    }

    /// Run a single-row UPDATE/DELETE, mapping "no rows" to NotFound
    fn execute_one(&self, id: TaskId, sql: &str, args: &[&dyn ToSql]) -> Result<(), StoreError> {
        let changed = self.conn.execute(sql, args)?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    let _journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, tags, status, due, created_at, updated_at FROM tasks";

/// Column values before tags and status are decoded
struct TaskRow {
    id: TaskId,
    title: String,
    description: String,
    tags: String,
    status: String,
    due: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(TaskRow {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            tags: row.get(3)?,
            status: row.get(4)?,
            due: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_task(self) -> Result<Task, StoreError> {
        let status = Status::parse(&self.status).ok_or_else(|| StoreError::CorruptRow {
            id: self.id,
            reason: format!("unknown status {:?}", self.status),
        })?;
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).map_err(|e| StoreError::CorruptRow {
                id: self.id,
                reason: format!("bad tags: {}", e),
            })?;
        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            tags: normalize_tags(tags),
            status,
            due: self.due,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TaskStore for SqliteStore {
    fn create_task(&mut self, title: &str, status: Status) -> Result<Task, StoreError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO tasks (title, description, tags, status, created_at, updated_at)
             VALUES (?1, '', '[]', ?2, ?3, ?3)",
            params![title, status.as_str(), now],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, status = status.as_str(), "created task");
        Ok(Task {
            id,
            title: title.to_string(),
            description: String::new(),
            tags: Vec::new(),
            status,
            due: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_all_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(TaskRow::into_task).collect()
    }

    fn update_title(
        &mut self,
        id: TaskId,
        title: &str,
        status: Status,
    ) -> Result<(), StoreError> {
        self.execute_one(
            id,
            "UPDATE tasks SET title = ?1, status = ?2, updated_at = MAX(?3, updated_at, created_at)
             WHERE id = ?4",
            &[&title, &status.as_str(), &Utc::now(), &id],
        )
    }

    fn update_status(&mut self, id: TaskId, status: Status) -> Result<(), StoreError> {
        self.execute_one(
            id,
            "UPDATE tasks SET status = ?1, updated_at = MAX(?2, updated_at, created_at)
             WHERE id = ?3",
            &[&status.as_str(), &Utc::now(), &id],
        )
    }

    fn update_description(&mut self, id: TaskId, text: &str) -> Result<(), StoreError> {
        self.execute_one(
            id,
            "UPDATE tasks SET description = ?1, updated_at = MAX(?2, updated_at, created_at)
             WHERE id = ?3",
            &[&text, &Utc::now(), &id],
        )
    }

    fn update_tags(&mut self, id: TaskId, tags: &[String]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&normalize_tags(tags)).map_err(|e| {
            StoreError::CorruptRow {
                id,
                reason: format!("cannot encode tags: {}", e),
            }
        })?;
        self.execute_one(
            id,
            "UPDATE tasks SET tags = ?1, updated_at = MAX(?2, updated_at, created_at)
             WHERE id = ?3",
            &[&encoded, &Utc::now(), &id],
        )
    }

    fn update_due(&mut self, id: TaskId, due: Option<NaiveDate>) -> Result<(), StoreError> {
        self.execute_one(
            id,
            "UPDATE tasks SET due = ?1, updated_at = MAX(?2, updated_at, created_at)
             WHERE id = ?3",
            &[&due, &Utc::now(), &id],
        )
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.execute_one(id, "DELETE FROM tasks WHERE id = ?1", &[&id])
    }
}
