//! Read-side queries against loaded tables.

pub mod tables;

pub use tables::{
    column_names, count_rows, list_tables, read_dataset, read_rows, table_columns, table_exists,
    ColumnInfo,
};
