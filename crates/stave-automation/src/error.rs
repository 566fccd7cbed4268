//! Error types for stave-automation.

use thiserror::Error;

/// Error type for stave-automation operations.
///
/// Evaluation and mutation never fail; only name parsing and JSON I/O do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown automation parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown curve type: {0}")]
    UnknownCurve(String),

    #[error("Unknown automation mode: {0}")]
    UnknownMode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
