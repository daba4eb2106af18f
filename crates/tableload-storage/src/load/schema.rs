//! DDL inferred from dataset columns.

use std::borrow::Cow;

use tableload_core::dataset::{Column, Dataset, Value};

/// Declared column type for a created table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Boolean,
    Integer,
    Real,
    Text,
    Blob,
    /// No declared type: values keep their own storage class.
    Untyped,
}

impl SqlType {
    pub fn declaration(self) -> Option<&'static str> {
        match self {
            SqlType::Boolean => Some("BOOLEAN"),
            SqlType::Integer => Some("INTEGER"),
            SqlType::Real => Some("REAL"),
            SqlType::Text => Some("TEXT"),
            SqlType::Blob => Some("BLOB"),
            SqlType::Untyped => None,
        }
    }
}

/// Infer a column's declared type from its non-null values.
///
/// Integers widen to REAL when mixed with reals; any other mix is left
/// untyped. An all-null column is TEXT.
pub fn infer_column_type(column: &Column) -> SqlType {
    let (mut bools, mut ints, mut reals, mut texts, mut blobs) = (false, false, false, false, false);
    for value in &column.values {
        match value {
            Value::Null => {}
            Value::Bool(_) => bools = true,
            Value::Integer(_) | Value::UInteger(_) => ints = true,
            Value::Real(_) => reals = true,
            Value::Text(_) => texts = true,
            Value::Blob(_) => blobs = true,
        }
    }

    match (bools, ints, reals, texts, blobs) {
        (false, false, false, false, false) => SqlType::Text,
        (true, false, false, false, false) => SqlType::Boolean,
        (false, true, false, false, false) => SqlType::Integer,
        (false, _, true, false, false) => SqlType::Real,
        (false, false, false, true, false) => SqlType::Text,
        (false, false, false, false, true) => SqlType::Blob,
        _ => SqlType::Untyped,
    }
}

/// Quote an identifier, doubling embedded double quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render a table name for SQL, quoted or verbatim.
pub fn table_ident(name: &str, quote: bool) -> Cow<'_, str> {
    if quote {
        Cow::Owned(quote_identifier(name))
    } else {
        Cow::Borrowed(name)
    }
}

pub fn drop_table_sql(table_ident: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_ident}")
}

pub fn create_table_sql(table_ident: &str, dataset: &Dataset) -> String {
    let columns: Vec<String> = dataset
        .columns()
        .iter()
        .map(|c| match infer_column_type(c).declaration() {
            Some(decl) => format!("{} {decl}", quote_identifier(&c.name)),
            None => quote_identifier(&c.name),
        })
        .collect();
    format!("CREATE TABLE {table_ident} ({})", columns.join(", "))
}

pub fn insert_sql(table_ident: &str, dataset: &Dataset) -> String {
    let names: Vec<String> = dataset.column_names().map(quote_identifier).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {table_ident} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}
