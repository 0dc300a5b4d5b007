//! Tabular previews of data frames.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Rendered rows of a table, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Row count of the source before truncation.
    pub total_rows: usize,
}

impl TablePreview {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let total_rows = rows.len();
        Self {
            columns,
            rows,
            total_rows,
        }
    }

    /// Build a preview of the first `limit` rows of a DataFrame.
    pub fn from_frame(df: &DataFrame, limit: usize) -> Self {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let shown = df.height().min(limit);
        let rows = (0..shown)
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(val) if !val.is_null() => val.to_string().trim_matches('"').to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows,
            total_rows: df.height(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_frame_limits_rows_and_blanks_nulls() {
        let df = DataFrame::new(vec![
            Column::new("title".into(), &["Alpha", "Beta", "Gamma"]),
            Column::new("duration".into(), &[Some(90i64), None, Some(45)]),
        ])
        .unwrap();

        let table = TablePreview::from_frame(&df, 2);
        assert_eq!(table.columns, vec!["title", "duration"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Alpha", "90"]);
        assert_eq!(table.rows[1], vec!["Beta", ""]);
        assert_eq!(table.total_rows, 3);
        assert!(table.is_truncated());
    }
}
