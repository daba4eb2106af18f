use serde::{Deserialize, Serialize};

/// Loader behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Quote table names as SQL identifiers. When off, names are written
    /// verbatim and the store rejects keywords or non-identifier characters.
    pub quote_table_names: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            quote_table_names: true,
        }
    }
}
