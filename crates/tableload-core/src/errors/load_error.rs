//! Errors surfaced by the loader.
//!
//! The storage crate classifies raw SQLite failures into these variants.
//! The first failing table stops the load; tables written before it stay
//! committed.

/// A table write was rejected by the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The store's naming rules reject the table name.
    #[error("invalid table name '{table}': {message}")]
    InvalidTableName { table: String, message: String },

    /// The store handle is closed, unreachable, or otherwise unusable.
    #[error("store connection unusable: {message}")]
    Connection { message: String },

    /// A value cannot be represented in the store's type system.
    #[error("cannot map value in {table}.{column} (row {row}): {reason}")]
    TypeMapping {
        table: String,
        /// The offending column, or [`LoadError::ANY_COLUMN`] when the store
        /// rejected the row without saying which value it refused.
        column: String,
        row: usize,
        reason: String,
    },

    /// The caller lacks rights to drop, create, or write the table.
    #[error("permission denied writing table '{table}': {message}")]
    Permission { table: String, message: String },

    /// Any other rejection by the store.
    #[error("store rejected table '{table}': {message}")]
    Storage { table: String, message: String },
}

impl LoadError {
    /// Column reported by `TypeMapping` when the failure covers the whole row.
    pub const ANY_COLUMN: &'static str = "*";

    pub fn invalid_table_name(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTableName {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn type_mapping(
        table: impl Into<String>,
        column: impl Into<String>,
        row: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeMapping {
            table: table.into(),
            column: column.into(),
            row,
            reason: reason.into(),
        }
    }

    pub fn permission(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Permission {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn storage(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            table: table.into(),
            message: message.into(),
        }
    }

    /// The table whose write failed, if the failure is tied to one.
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::InvalidTableName { table, .. }
            | Self::TypeMapping { table, .. }
            | Self::Permission { table, .. }
            | Self::Storage { table, .. } => Some(table),
            Self::Connection { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::type_mapping("users", "score", 3, "non-finite real NaN");
        assert_eq!(
            err.to_string(),
            "cannot map value in users.score (row 3): non-finite real NaN"
        );

        let err = LoadError::invalid_table_name("select", "near \"select\": syntax error");
        assert!(err.to_string().starts_with("invalid table name 'select'"));
    }

    #[test]
    fn test_whole_row_type_mapping_display() {
        let err = LoadError::type_mapping("blobs", LoadError::ANY_COLUMN, 0, "string or blob too big");
        assert_eq!(
            err.to_string(),
            "cannot map value in blobs.* (row 0): string or blob too big"
        );
    }

    #[test]
    fn test_table_accessor() {
        assert_eq!(LoadError::permission("orders", "readonly").table(), Some("orders"));
        assert_eq!(LoadError::connection("closed").table(), None);
    }
}
