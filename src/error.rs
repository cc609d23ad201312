use thiserror::Error;

/// Errors raised while loading schedule data or resolving times against it.
#[derive(Debug, Error)]
pub enum Error {
    /// An exact time-index lookup was given a value that is not on the grid.
    #[error("time {day_count} is outside the indexed range (index miss)")]
    IndexMiss { day_count: f64 },

    #[error("invalid time index: {0}")]
    InvalidTimeIndex(String),

    #[error("invalid constraint series '{name}': {reason}")]
    InvalidSeries { name: String, reason: String },

    #[error("no usable rows in {0}")]
    EmptyImport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
