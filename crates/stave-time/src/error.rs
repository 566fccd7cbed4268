//! Error types for stave-time.

use thiserror::Error;

/// Error type for stave-time operations.
///
/// Numeric inputs are clamped rather than rejected, so the only fallible
/// surface is parsing names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown grid resolution: {0}")]
    UnknownGridResolution(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
