use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Dashboard settings, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the page CSV files.
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: PathBuf,
    /// Page shown first when the GUI starts. Falls back to the first page
    /// when missing or not registered.
    #[serde(default)]
    pub default_page: Option<String>,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
    /// Pixel size of exported figures.
    #[serde(default = "default_export_size")]
    pub export_size: (u32, u32),
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_datasets_dir() -> PathBuf {
    PathBuf::from("datasets")
}

fn default_window_size() -> (f32, f32) {
    (1400.0, 900.0)
}

fn default_export_size() -> (u32, u32) {
    (1024, 640)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            datasets_dir: default_datasets_dir(),
            default_page: None,
            window_size: default_window_size(),
            export_size: default_export_size(),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing or empty file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
