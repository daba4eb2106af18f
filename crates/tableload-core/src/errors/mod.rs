//! Error types shared across tableload crates.

pub mod config_error;
pub mod dataset_error;
pub mod load_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use load_error::LoadError;
