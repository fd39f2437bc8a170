//! Session key-value repository and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/set/remove/clear over string keys and values.
//! - Keep SQL details inside the session persistence boundary.
//!
//! # Invariants
//! - `set` replaces any previous value stored under the same key.
//! - `remove` and `clear` are idempotent.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for session persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was opened without the session schema.
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "session schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value contract backing the signed-in session.
pub trait SessionRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&self, key: &str) -> RepoResult<()>;
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `SchemaNotReady` when migrations were not applied on `conn`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO session_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM session_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM session_entries;", [])?;
        Ok(())
    }
}
