//! Musical time for Stave.
//!
//! Beats are the canonical unit of position everywhere in the engine. Seconds
//! only appear at the boundary to a real-time transport, through an explicit
//! [`Tempo`].
//!
//! - [`BeatPosition`]: non-negative beat value with clamped arithmetic
//! - [`TimeSignature`] / [`BarPosition`]: meter and bar/beat/subdivision decomposition
//! - [`Tempo`], [`RegionTiming`]: beat ↔ seconds conversion and time-locked duration recompute
//! - [`GridResolution`], [`QuantizeSettings`]: snap-to-grid with strength and swing
//!
//! # Example
//!
//! ```
//! use stave_time::{BeatPosition, GridResolution, Tempo, TimeSignature};
//!
//! let ts = TimeSignature::new(4, 4);
//! let snapped = GridResolution::Sixteenth.quantize(1.07, ts);
//! assert!((snapped - 1.0).abs() < 1e-9);
//!
//! let pos = BeatPosition::from_beats(8.0);
//! assert!((pos.to_seconds(Tempo::new(120.0)) - 4.0).abs() < 1e-9);
//! ```

pub mod error;
pub use error::{Error, Result};

mod grid;
pub use grid::{GridResolution, QuantizeSettings, QuantizeSettingsBuilder};

mod position;
pub use position::BeatPosition;

mod signature;
pub use signature::{BarPosition, TimeSignature};

mod tempo;
pub use tempo::{recompute_duration_beats, RegionTiming, Tempo, TimeBase};
