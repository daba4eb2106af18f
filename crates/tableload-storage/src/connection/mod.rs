//! Connection management.
//!
//! The loader itself only borrows a `rusqlite::Connection`; `DatabaseManager`
//! is the handle for callers that want the workspace to open and configure
//! one.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tableload_core::config::StorageConfig;
use tableload_core::dataset::LoadBatch;
use tableload_core::errors::LoadError;

use crate::load::{LoadStats, Loader};

/// Owns a single writer connection, serialized through a mutex.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open (or create) a database file and apply `config` pragmas.
    /// The parent directory is created if missing.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, LoadError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LoadError::connection(format!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            LoadError::connection(format!("failed to open {}: {e}", path.display()))
        })?;
        Self::configure(conn, config, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(config: &StorageConfig) -> Result<Self, LoadError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LoadError::connection(format!("failed to open in-memory database: {e}")))?;
        Self::configure(conn, config, None)
    }

    fn configure(
        conn: Connection,
        config: &StorageConfig,
        path: Option<PathBuf>,
    ) -> Result<Self, LoadError> {
        let journal_mode = pragmas::apply_pragmas(&conn, config)
            .map_err(|e| LoadError::connection(format!("failed to apply pragmas: {e}")))?;
        tracing::debug!(
            path = ?path,
            journal_mode = %journal_mode,
            "database opened"
        );
        Ok(Self {
            writer: Mutex::new(conn),
            path,
        })
    }

    /// Path of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` with exclusive access to the writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, LoadError>
    where
        F: FnOnce(&Connection) -> Result<T, LoadError>,
    {
        let conn = self
            .writer
            .lock()
            .map_err(|_| LoadError::connection("writer lock poisoned"))?;
        f(&conn)
    }

    /// Load a batch through the writer connection.
    pub fn load(&self, batch: &LoadBatch, loader: &Loader) -> Result<LoadStats, LoadError> {
        self.with_writer(|conn| loader.load(conn, batch))
    }

    /// Checkpoint the WAL in TRUNCATE mode. A no-op outside WAL mode.
    pub fn checkpoint(&self) -> Result<(), LoadError> {
        self.with_writer(|conn| {
            conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
                .map_err(|e| LoadError::connection(format!("WAL checkpoint failed: {e}")))
        })
    }
}
