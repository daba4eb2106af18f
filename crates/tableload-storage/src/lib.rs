//! # tableload-storage
//!
//! SQLite persistence layer for tableload.
//! Drop-and-recreate table loader, schema inference from dataset values,
//! per-table savepoints, connection management, introspection queries.

pub mod connection;
mod error_map;
pub mod load;
pub mod queries;

pub use connection::DatabaseManager;
pub use load::{load, LoadStats, Loader, TableStats};
