//! Centralized error type for the stave umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Time(#[from] stave_time::Error),

    #[cfg(feature = "automation")]
    #[error("Automation: {0}")]
    Automation(#[from] stave_automation::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
