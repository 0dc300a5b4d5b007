//! Display surface module - what report pages write to

mod canvas;
mod figure;
mod table;
mod text;

pub use canvas::{Block, DisplaySurface, MarkdownBlock, ReportCanvas};
pub use figure::{Figure, FigureKind, NamedValues, PointSeries};
pub use table::TablePreview;
pub use text::render_text;
