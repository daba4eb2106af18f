//! In-memory tabular data handed to the loader.

pub mod batch;
pub mod table;
pub mod value;

pub use batch::LoadBatch;
pub use table::{Column, Dataset, DatasetBuilder};
pub use value::Value;
