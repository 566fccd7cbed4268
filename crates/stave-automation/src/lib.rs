//! Parameter automation for Stave.
//!
//! A track owns one [`AutomationLane`] per [`AutomationParameter`]. Each lane
//! is a beat-sorted list of [`AutomationPoint`]s; the segment between two
//! points is shaped by the first point's [`CurveType`] and tension, or by
//! Bézier handles when either end has one. All values are normalised to
//! `[0, 1]`.
//!
//! Editing happens on [`TrackAutomationData`]. The render thread reads
//! through an [`AutomationReader`] obtained from a [`SharedTrackAutomation`],
//! which publishes immutable snapshots via `arc-swap`.
//!
//! # Example
//!
//! ```
//! use stave_automation::{AutomationParameter, CurveType, SharedTrackAutomation};
//!
//! let shared = SharedTrackAutomation::default();
//! let reader = shared.reader();
//!
//! shared.update(|track| {
//!     let lane = track.add_lane(AutomationParameter::FilterCutoff);
//!     lane.add_point(0.0, 0.2, CurveType::Smooth);
//!     lane.add_point(16.0, 1.0, CurveType::Linear);
//! });
//!
//! // render thread
//! let cutoff = reader.value(AutomationParameter::FilterCutoff, 8.0).unwrap();
//! assert!((cutoff - 0.6).abs() < 1e-6);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod curve;
pub use curve::CurveType;

mod lane;
pub use lane::{AutomationLane, LaneId, PointList};

mod mode;
pub use mode::AutomationMode;

mod parameter;
pub use parameter::{AutomationParameter, ParameterCategory};

mod point;
pub use point::{AutomationPoint, ControlPoint, PointId};

mod shared;
pub use shared::{AutomationReader, SharedTrackAutomation};

mod track;
pub use track::TrackAutomationData;
