//! Drop-and-recreate of a single table.

use rusqlite::{params_from_iter, Connection};
use tableload_core::dataset::Dataset;
use tableload_core::errors::LoadError;

use super::bind::to_sql_output;
use super::schema;
use super::TableStats;
use crate::connection::writer::with_savepoint;
use crate::error_map::{classify, Step};

/// Replace table `name` with the contents of `dataset`.
///
/// Runs DROP TABLE IF EXISTS, CREATE TABLE, then one INSERT per row inside
/// a savepoint, so a failure leaves the previous table in place.
pub(crate) fn replace_table(
    conn: &Connection,
    name: &str,
    dataset: &Dataset,
    quote_table_name: bool,
) -> Result<TableStats, LoadError> {
    let ident = schema::table_ident(name, quote_table_name);

    with_savepoint(conn, name, |conn| {
        conn.execute(&schema::drop_table_sql(&ident), [])
            .map_err(|e| classify(Step::Drop, name, e))?;
        conn.execute(&schema::create_table_sql(&ident, dataset), [])
            .map_err(|e| classify(Step::Create, name, e))?;
        let rows = insert_rows(conn, name, &ident, dataset)?;

        Ok(TableStats {
            name: name.to_string(),
            columns: dataset.num_columns(),
            rows,
        })
    })
}

fn insert_rows(
    conn: &Connection,
    name: &str,
    ident: &str,
    dataset: &Dataset,
) -> Result<usize, LoadError> {
    let num_rows = dataset.num_rows();
    if num_rows == 0 {
        return Ok(0);
    }

    let mut stmt = conn
        .prepare(&schema::insert_sql(ident, dataset))
        .map_err(|e| classify(Step::Insert { row: 0 }, name, e))?;

    let mut params = Vec::with_capacity(dataset.num_columns());
    for row in 0..num_rows {
        params.clear();
        for column in dataset.columns() {
            let value = column.values.get(row).ok_or_else(|| {
                LoadError::storage(
                    name,
                    format!("column '{}' has no value at row {row}", column.name),
                )
            })?;
            let value = to_sql_output(value)
                .map_err(|reason| LoadError::type_mapping(name, &column.name, row, reason))?;
            params.push(value);
        }
        stmt.execute(params_from_iter(params.iter()))
            .map_err(|e| classify(Step::Insert { row }, name, e))?;
    }
    Ok(num_rows)
}
