//! Error types for flow analytics

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// Smoothing factor outside (0, 1]
    #[error("invalid EMA smoothing factor: {0}")]
    InvalidAlpha(f64),
}

pub type Result<T> = std::result::Result<T, FlowError>;
