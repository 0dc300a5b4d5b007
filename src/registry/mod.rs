//! Page registry module - ordered report pages and their dispatch

mod page_registry;
mod selection;

pub use page_registry::{ConfigurationError, PageRegistry, RenderFn, ReportUnit};
pub use selection::{FixedSelection, PageSelector, SelectionState};
