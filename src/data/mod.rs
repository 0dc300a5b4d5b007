//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{f64_values, i64_values, string_values, DataLoader, LoaderError};
pub use processor::DataProcessor;
