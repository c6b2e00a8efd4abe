//! Error types for the I/O boundary (loaders and settings)
//!
//! The numerical core never fails: XIRR signals "no answer" with `None` and the
//! Monte Carlo engine clamps its inputs. Only reading external data can error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Invalid setting {key}={value:?}")]
    InvalidSetting { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
