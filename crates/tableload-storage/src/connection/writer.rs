//! Write connection utilities: per-table SAVEPOINT scopes.

use rusqlite::Connection;
use tableload_core::errors::LoadError;

use crate::error_map::{classify, Step};

const SAVEPOINT: &str = "tableload_replace";

/// Run `f` inside a SAVEPOINT and release it on success.
///
/// On failure the savepoint is rolled back, undoing everything `f` did,
/// and the error is returned unchanged. Outside a transaction the savepoint
/// commits on release; inside a caller's transaction it nests and leaves
/// the commit to the caller.
pub fn with_savepoint<F, T>(conn: &Connection, table: &str, f: F) -> Result<T, LoadError>
where
    F: FnOnce(&Connection) -> Result<T, LoadError>,
{
    conn.execute_batch(&format!("SAVEPOINT {SAVEPOINT}"))
        .map_err(|e| classify(Step::Savepoint, table, e))?;

    let result = f(conn).and_then(|value| {
        conn.execute_batch(&format!("RELEASE {SAVEPOINT}"))
            .map_err(|e| classify(Step::Release, table, e))?;
        Ok(value)
    });

    if result.is_err() {
        rollback(conn, table);
    }
    result
}

fn rollback(conn: &Connection, table: &str) {
    // May fail if SQLite already rolled the transaction back on its own.
    if let Err(e) = conn.execute_batch(&format!("ROLLBACK TO {SAVEPOINT}; RELEASE {SAVEPOINT}")) {
        tracing::warn!(table, error = %e, "savepoint rollback failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_success_is_committed() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER)").unwrap();
        with_savepoint(&conn, "t", |c| {
            c.execute("INSERT INTO t VALUES (1)", [])
                .map_err(|e| LoadError::storage("t", e.to_string()))?;
            Ok(())
        })
        .unwrap();
        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_failure_is_rolled_back() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER)").unwrap();
        let err = with_savepoint(&conn, "t", |c| {
            c.execute("INSERT INTO t VALUES (1)", [])
                .map_err(|e| LoadError::storage("t", e.to_string()))?;
            Err::<(), _>(LoadError::storage("t", "boom"))
        })
        .unwrap_err();
        assert_eq!(err, LoadError::storage("t", "boom"));
        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_nests_inside_outer_transaction() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER); BEGIN").unwrap();
        with_savepoint(&conn, "t", |c| {
            c.execute("INSERT INTO t VALUES (1)", [])
                .map_err(|e| LoadError::storage("t", e.to_string()))?;
            Ok(())
        })
        .unwrap();
        assert!(!conn.is_autocommit());
        conn.execute_batch("ROLLBACK").unwrap();
        assert_eq!(count(&conn), 0);
    }
}
