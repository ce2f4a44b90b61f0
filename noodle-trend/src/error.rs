//! Error types for trend plotting.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for trend operations.
pub type Result<T> = std::result::Result<T, TrendError>;

/// Errors raised while loading, resolving, or rendering a trend.
#[derive(Error, Debug)]
pub enum TrendError {
    /// Dataset or output directory IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset could not be read as CSV at all
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset header lacks a required column
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// An explicit start/end bound could not be parsed
    #[error("Invalid {field} date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// Nothing left after filtering
    #[error("No data in the specified date range ({start} to {end}).")]
    NoDataInRange { start: NaiveDate, end: NaiveDate },

    /// Chart backend failure
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl TrendError {
    /// Whether this is the deliberate "empty range" condition.
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoDataInRange { .. })
    }
}
