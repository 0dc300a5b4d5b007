//! Stats module - descriptive statistics behind the charts

mod calculator;

pub use calculator::{BoxSummary, HistogramBin, StatsCalculator};
