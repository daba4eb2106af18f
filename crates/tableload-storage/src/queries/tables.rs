//! Table introspection: existence, columns, row counts, contents.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use tableload_core::dataset::{Column, Dataset, Value};
use tableload_core::errors::LoadError;

use crate::load::schema::quote_identifier;

/// A column as declared in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, empty for untyped columns.
    pub declared_type: String,
}

fn query_err(table: &str) -> impl Fn(rusqlite::Error) -> LoadError + '_ {
    move |e| LoadError::storage(table, e.to_string())
}

/// Whether a table (not a view or index) named `name` exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, LoadError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |row| row.get(0),
        )
        .map_err(query_err(name))?;
    Ok(count > 0)
}

/// User tables, sorted by name. SQLite's internal tables are excluded.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>, LoadError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'
             ORDER BY name",
        )
        .map_err(query_err("sqlite_master"))?;

    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(query_err("sqlite_master"))?;

    rows.collect::<Result<Vec<String>, _>>()
        .map_err(query_err("sqlite_master"))
}

/// Columns of `table` in declaration order. Empty if the table is missing.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>, LoadError> {
    let mut stmt = conn
        .prepare_cached("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(query_err(table))?;

    let rows = stmt
        .query_map(params![table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
            })
        })
        .map_err(query_err(table))?;

    rows.collect::<Result<Vec<_>, _>>().map_err(query_err(table))
}

pub fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>, LoadError> {
    Ok(table_columns(conn, table)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64, LoadError> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(query_err(table))
}

/// Names SQLite accepts for the implicit row id, in preference order.
const ROWID_ALIASES: [&str; 3] = ["_rowid_", "rowid", "oid"];

/// All rows of `table` in insertion (rowid) order, values in column order.
///
/// A user column may shadow a rowid alias, so the first alias no column
/// claims is used. With all three taken the rows come back in scan order,
/// which for a rowid table is rowid order.
pub fn read_rows(conn: &Connection, table: &str) -> Result<Vec<Vec<Value>>, LoadError> {
    let columns = column_names(conn, table)?;
    let order_by = ROWID_ALIASES
        .into_iter()
        .find(|alias| !columns.iter().any(|c| c.eq_ignore_ascii_case(alias)));
    let sql = match order_by {
        Some(alias) => format!("SELECT * FROM {} ORDER BY {alias}", quote_identifier(table)),
        None => format!("SELECT * FROM {}", quote_identifier(table)),
    };
    let mut stmt = conn.prepare(&sql).map_err(query_err(table))?;
    let width = stmt.column_count();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|i| row.get_ref(i).map(from_value_ref))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(query_err(table))?;

    rows.collect::<Result<Vec<_>, _>>().map_err(query_err(table))
}

/// Rebuild a dataset from `table`. Integer values in BOOLEAN columns come
/// back as `Value::Bool`.
pub fn read_dataset(conn: &Connection, table: &str) -> Result<Dataset, LoadError> {
    let infos = table_columns(conn, table)?;
    let rows = read_rows(conn, table)?;

    let mut columns: Vec<Column> = infos
        .iter()
        .map(|c| Column::new(c.name.clone(), Vec::with_capacity(rows.len())))
        .collect();

    for row in rows {
        for ((column, info), value) in columns.iter_mut().zip(&infos).zip(row) {
            let value = match value {
                Value::Integer(i) if info.declared_type.eq_ignore_ascii_case("BOOLEAN") => {
                    Value::Bool(i != 0)
                }
                other => other,
            };
            column.values.push(value);
        }
    }

    Dataset::new(columns).map_err(|e| LoadError::storage(table, e.to_string()))
}

fn from_value_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE \"users\" (\"id\" INTEGER, \"name\" TEXT, \"active\" BOOLEAN);
             INSERT INTO users VALUES (1, 'Ann', 1), (2, NULL, 0);
             CREATE VIEW v_users AS SELECT * FROM users;",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_table_exists_ignores_views() {
        let conn = setup();
        assert!(table_exists(&conn, "users").unwrap());
        assert!(!table_exists(&conn, "v_users").unwrap());
        assert!(!table_exists(&conn, "missing").unwrap());
    }

    #[test]
    fn test_list_tables() {
        let conn = setup();
        conn.execute_batch("CREATE TABLE a (x)").unwrap();
        assert_eq!(list_tables(&conn).unwrap(), vec!["a", "users"]);
    }

    #[test]
    fn test_columns_in_order() {
        let conn = setup();
        assert_eq!(column_names(&conn, "users").unwrap(), vec!["id", "name", "active"]);
        assert!(column_names(&conn, "missing").unwrap().is_empty());
    }

    #[test]
    fn test_read_dataset_restores_bools() {
        let conn = setup();
        let ds = read_dataset(&conn, "users").unwrap();
        assert_eq!(count_rows(&conn, "users").unwrap(), 2);
        assert_eq!(
            ds.column("active").unwrap().values,
            vec![Value::Bool(true), Value::Bool(false)]
        );
        assert_eq!(ds.row(1).unwrap(), vec![&Value::Integer(2), &Value::Null, &Value::Bool(false)]);
    }

    #[test]
    fn test_read_rows_with_rowid_named_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (\"rowid\" INTEGER, \"_rowid_\" INTEGER, v TEXT);
             INSERT INTO t VALUES (3, 30, 'a'), (2, 20, 'b'), (1, 10, 'c');",
        )
        .unwrap();
        let values: Vec<Value> = read_rows(&conn, "t")
            .unwrap()
            .into_iter()
            .map(|r| r[2].clone())
            .collect();
        assert_eq!(values, vec![Value::from("a"), Value::from("b"), Value::from("c")]);
    }

    #[test]
    fn test_count_missing_table_errors() {
        let conn = setup();
        assert!(matches!(
            count_rows(&conn, "missing"),
            Err(LoadError::Storage { .. })
        ));
    }
}
