//! # tableload-core
//!
//! Core types, errors, config, and tracing for the tableload dataset loader.
//! Depends on nothing database-specific; the SQLite side lives in
//! `tableload-storage`.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod telemetry;

pub use config::TableloadConfig;
pub use dataset::{Column, Dataset, LoadBatch, Value};
pub use errors::{ConfigError, DatasetError, LoadError};
