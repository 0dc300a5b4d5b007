//! Figure description shared by the interactive plotter and the PNG renderer.

use serde::{Deserialize, Serialize};

/// A named group of values (one box, one strip row, one bar series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValues {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedValues {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A named series of (x, y) points, optionally with a fixed RGB colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Option<[u8; 3]>,
}

impl PointSeries {
    pub fn new(name: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            points,
            color: None,
        }
    }

    pub fn with_color(mut self, rgb: [u8; 3]) -> Self {
        self.color = Some(rgb);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigureKind {
    /// One bar per category for each series (grouped when several series).
    Bars {
        categories: Vec<String>,
        series: Vec<NamedValues>,
    },
    Lines {
        series: Vec<PointSeries>,
    },
    Scatter {
        series: Vec<PointSeries>,
    },
    Histogram {
        values: Vec<f64>,
        bins: usize,
    },
    /// One box per group.
    Boxes {
        groups: Vec<NamedValues>,
    },
    /// Jittered points, values along x, one row per group.
    Strip {
        groups: Vec<NamedValues>,
    },
}

/// A chart the page asked to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Plot the value axis on a log10 scale.
    #[serde(default)]
    pub log_values: bool,
    pub kind: FigureKind,
}

impl Figure {
    pub fn new(title: impl Into<String>, kind: FigureKind) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            log_values: false,
            kind,
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_log_values(mut self) -> Self {
        self.log_values = true;
        self
    }

    /// Map a value onto the plotted value axis. Non-positive values have no
    /// log and are dropped by returning `None`.
    pub fn plotted_value(&self, v: f64) -> Option<f64> {
        if v.is_nan() {
            return None;
        }
        if self.log_values {
            (v > 0.0).then(|| v.log10())
        } else {
            Some(v)
        }
    }

    /// Short human readable name of the figure kind.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FigureKind::Bars { .. } => "bar chart",
            FigureKind::Lines { .. } => "line chart",
            FigureKind::Scatter { .. } => "scatter plot",
            FigureKind::Histogram { .. } => "histogram",
            FigureKind::Boxes { .. } => "box plot",
            FigureKind::Strip { .. } => "strip plot",
        }
    }

    /// Number of plotted data points.
    pub fn point_count(&self) -> usize {
        match &self.kind {
            FigureKind::Bars { series, .. } => series.iter().map(|s| s.values.len()).sum(),
            FigureKind::Lines { series } | FigureKind::Scatter { series } => {
                series.iter().map(|s| s.points.len()).sum()
            }
            FigureKind::Histogram { values, .. } => values.len(),
            FigureKind::Boxes { groups } | FigureKind::Strip { groups } => {
                groups.iter().map(|g| g.values.len()).sum()
            }
        }
    }
}
