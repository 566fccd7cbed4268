//! # Stave - Musical Time and Parameter Automation
//!
//! Beat-based timing and per-track parameter automation for a DAW.
//!
//! ## Architecture
//!
//! Stave is an umbrella crate that coordinates:
//! - **stave-time** - Beat positions, time signatures, tempo conversion, grid quantization
//! - **stave-automation** - Automation lanes, curves, modes and the lock-free render reader
//!
//! ## Quick Start
//!
//! ```
//! use stave::prelude::*;
//!
//! let shared = SharedTrackAutomation::default();
//! let reader = shared.reader();
//!
//! let ts = TimeSignature::new(4, 4);
//! shared.update(|track| {
//!     let lane = track.add_lane(AutomationParameter::Volume);
//!     lane.add_point(GridResolution::Sixteenth.quantize(0.02, ts), 0.0, CurveType::Linear);
//!     lane.add_point(4.0, 1.0, CurveType::Linear);
//! });
//!
//! // On the render thread, with the transport's beat
//! let beat = BeatPosition::from_seconds(1.0, Tempo::new(120.0));
//! let volume = reader.value(AutomationParameter::Volume, beat.beats());
//! assert_eq!(volume, Some(0.5));
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Time and automation
//! - `automation` - Automation subsystem

/// Re-export of stave-time for direct access
pub use stave_time as time;

pub use stave_time::{
    recompute_duration_beats, BarPosition, BeatPosition, GridResolution, QuantizeSettings,
    QuantizeSettingsBuilder, RegionTiming, Tempo, TimeBase, TimeSignature,
};

// Automation subsystem
#[cfg(feature = "automation")]
pub use stave_automation as automation;

#[cfg(feature = "automation")]
pub use stave_automation::{
    AutomationLane, AutomationMode, AutomationParameter, AutomationPoint, AutomationReader,
    ControlPoint, CurveType, LaneId, ParameterCategory, PointId, PointList,
    SharedTrackAutomation, TrackAutomationData,
};

mod error;

pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    // Time
    pub use crate::time::{
        BarPosition, BeatPosition, GridResolution, QuantizeSettings, RegionTiming, Tempo,
        TimeBase, TimeSignature,
    };

    // Automation
    #[cfg(feature = "automation")]
    pub use crate::automation::{
        AutomationLane, AutomationMode, AutomationParameter, AutomationPoint, CurveType,
        SharedTrackAutomation, TrackAutomationData,
    };
}
