//! The loader: persist each dataset of a batch as a table, replacing any
//! existing table of the same name.
//!
//! Tables are written one after another on the caller's thread. Each table
//! is replaced atomically on its own; there is no atomicity across tables.
//! The first failure stops the load and earlier tables stay written.

mod bind;
mod replace;
pub mod schema;

use rusqlite::Connection;
use serde::Serialize;
use tableload_core::config::LoaderConfig;
use tableload_core::dataset::LoadBatch;
use tableload_core::errors::LoadError;

/// What was written for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
}

/// Result of a successful load, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub tables: Vec<TableStats>,
}

impl LoadStats {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Writes load batches to a borrowed connection.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(LoaderConfig::default())
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Write every dataset in `batch` as a table of the same name.
    ///
    /// An empty batch touches nothing. The connection is neither configured
    /// nor closed; no top-level transaction is opened, so the call nests
    /// inside one the caller already holds.
    pub fn load(&self, conn: &Connection, batch: &LoadBatch) -> Result<LoadStats, LoadError> {
        let span = tracing::info_span!("load", tables = batch.len());
        let _guard = span.enter();

        let mut stats = LoadStats::default();
        if batch.is_empty() {
            tracing::debug!("empty batch");
            return Ok(stats);
        }

        for (name, dataset) in batch.iter() {
            match replace::replace_table(conn, name, dataset, self.config.quote_table_names) {
                Ok(table) => {
                    tracing::debug!(
                        table = name,
                        rows = table.rows,
                        columns = table.columns,
                        "table replaced"
                    );
                    stats.tables.push(table);
                }
                Err(e) => {
                    tracing::warn!(
                        table = name,
                        written = stats.table_count(),
                        error = %e,
                        "table load failed"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            tables = stats.table_count(),
            rows = stats.total_rows(),
            "load complete"
        );
        Ok(stats)
    }
}

/// Load `batch` into `conn` with default settings.
pub fn load(conn: &Connection, batch: &LoadBatch) -> Result<LoadStats, LoadError> {
    Loader::with_defaults().load(conn, batch)
}
