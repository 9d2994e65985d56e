//! Error types for burndown computation

use chrono::NaiveDate;
use std::path::PathBuf;

/// Blocking failures. Data-quality problems are reported as
/// [`crate::ReportWarning`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum BurndownError {
    /// Sprint window starts after it ends
    #[error("invalid sprint range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Required configuration is absent or empty
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BurndownError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingConfiguration(what.into())
    }

    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BurndownError>;
