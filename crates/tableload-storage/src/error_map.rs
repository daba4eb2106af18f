//! Classification of rusqlite failures into `LoadError` variants.

use rusqlite::ErrorCode;
use tableload_core::errors::LoadError;

/// The statement a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Savepoint,
    Drop,
    Create,
    Insert { row: usize },
    Release,
}

pub(crate) fn classify(step: Step, table: &str, err: rusqlite::Error) -> LoadError {
    let message = err.to_string();

    // A verbatim table name that smuggles in a second statement. `execute`
    // only reports the trailing text because `extra_check` is enabled.
    if matches!(err, rusqlite::Error::MultipleStatement) && matches!(step, Step::Drop | Step::Create)
    {
        return LoadError::invalid_table_name(table, message);
    }

    match err.sqlite_error_code() {
        Some(ErrorCode::PermissionDenied)
        | Some(ErrorCode::ReadOnly)
        | Some(ErrorCode::AuthorizationForStatementDenied) => {
            LoadError::permission(table, message)
        }
        Some(ErrorCode::CannotOpen)
        | Some(ErrorCode::NotADatabase)
        | Some(ErrorCode::SystemIoFailure)
        | Some(ErrorCode::DatabaseCorrupt)
        | Some(ErrorCode::ApiMisuse) => LoadError::connection(message),
        Some(ErrorCode::TypeMismatch) | Some(ErrorCode::TooBig) => match step {
            // SQLite does not say which bound value it refused.
            Step::Insert { row } => {
                LoadError::type_mapping(table, LoadError::ANY_COLUMN, row, message)
            }
            _ => LoadError::storage(table, message),
        },
        // Plain SQLITE_ERROR while dropping means the name itself did not parse
        // or names something that is not a table.
        Some(ErrorCode::Unknown) if step == Step::Drop => {
            LoadError::invalid_table_name(table, message)
        }
        _ if message.contains("reserved for internal use") => {
            LoadError::invalid_table_name(table, message)
        }
        _ if step == Step::Create && message.contains("already an index named") => {
            LoadError::invalid_table_name(table, message)
        }
        _ => LoadError::storage(table, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn fail(conn: &Connection, sql: &str) -> rusqlite::Error {
        conn.execute(sql, []).unwrap_err()
    }

    #[test]
    fn test_syntax_error_on_drop_is_invalid_name() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fail(&conn, "DROP TABLE IF EXISTS select");
        assert!(matches!(
            classify(Step::Drop, "select", err),
            LoadError::InvalidTableName { .. }
        ));
    }

    #[test]
    fn test_trailing_statement_is_invalid_name() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fail(&conn, "DROP TABLE IF EXISTS a; DROP TABLE victim; --");
        assert!(matches!(err, rusqlite::Error::MultipleStatement));
        assert!(matches!(
            classify(Step::Drop, "a; DROP TABLE victim; --", err),
            LoadError::InvalidTableName { .. }
        ));
    }

    #[test]
    fn test_too_big_on_insert_names_whole_row() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_TOOBIG),
            None,
        );
        match classify(Step::Insert { row: 4 }, "blobs", err) {
            LoadError::TypeMapping { table, column, row, .. } => {
                assert_eq!(table, "blobs");
                assert_eq!(column, LoadError::ANY_COLUMN);
                assert_eq!(row, 4);
            }
            other => panic!("expected TypeMapping, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_prefix_is_invalid_name() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fail(&conn, "CREATE TABLE \"sqlite_stuff\" (\"a\")");
        assert!(matches!(
            classify(Step::Create, "sqlite_stuff", err),
            LoadError::InvalidTableName { .. }
        ));
    }

    #[test]
    fn test_duplicate_column_is_storage() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fail(&conn, "CREATE TABLE \"t\" (\"a\", \"a\")");
        assert!(matches!(
            classify(Step::Create, "t", err),
            LoadError::Storage { .. }
        ));
    }
}
