//! Session schema steps, tracked in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs in ascending version order.
const SESSION_SCHEMA: &[(u32, &str)] = &[(1, include_str!("0001_session.sql"))];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SESSION_SCHEMA.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version()` inside one transaction.
///
/// A file already at the latest version is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = SESSION_SCHEMA
        .iter()
        .filter(|(version, _)| *version > found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *version)?;
    }
    tx.commit()?;

    info!(
        "event=session_db_migrate module=db status=ok from={} to={}",
        found, supported
    );
    Ok(())
}
