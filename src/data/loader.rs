//! CSV Data Loader Module
//! Loads page datasets with Polars and extracts typed columns.

use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Dataset not found: {}", .path.display())]
    MissingFile { path: PathBuf },
    #[error("Column {column:?} not found")]
    MissingColumn { column: String },
}

/// Loads CSV datasets from one directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    dir: PathBuf,
}

impl DataLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load `<dir>/<file_name>` into a DataFrame.
    pub fn load_csv(&self, file_name: &str) -> Result<DataFrame, LoaderError> {
        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(LoaderError::MissingFile { path });
        }

        // Unparseable cells become nulls instead of failing the whole load
        let df = LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        tracing::debug!(
            file = file_name,
            rows = df.height(),
            columns = df.width(),
            "dataset loaded"
        );
        Ok(df)
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
    df.column(name).map_err(|_| LoaderError::MissingColumn {
        column: name.to_string(),
    })
}

/// Column values as strings; nulls become `None`.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let strings = column(df, name)?.cast(&DataType::String)?;
    let ca = strings.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Column values as floats; nulls, NaN and unparseable cells become `None`.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let floats = column(df, name)?.cast(&DataType::Float64)?;
    let ca = floats.f64()?;
    Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

/// Column values as integers; nulls and unparseable cells become `None`.
pub fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, LoaderError> {
    let ints = column(df, name)?.cast(&DataType::Int64)?;
    let ca = ints.i64()?;
    Ok(ca.into_iter().collect())
}
