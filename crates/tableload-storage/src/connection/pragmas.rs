//! PRAGMA setup for connections opened by `DatabaseManager`.

use std::time::Duration;

use rusqlite::Connection;
use tableload_core::config::StorageConfig;

/// Apply busy timeout, journal mode, synchronous, and foreign key settings.
/// Returns the journal mode SQLite actually selected (`memory` for
/// in-memory databases regardless of the request).
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> rusqlite::Result<String> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    let journal_mode: String = conn.pragma_update_and_check(
        None,
        "journal_mode",
        config.journal_mode.as_pragma(),
        |row| row.get(0),
    )?;
    conn.pragma_update(None, "synchronous", config.synchronous.as_pragma())?;
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
    Ok(journal_mode)
}
