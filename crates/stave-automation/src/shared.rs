//! Lock-free handoff of track automation to the render thread.
//!
//! ```text
//! Editor thread                          Render thread
//!     │                                       │
//!     ▼                                       ▼
//! ┌──────────────────────┐            ┌─────────────────┐
//! │ SharedTrackAutomation│──ArcSwap──▶│ AutomationReader│
//! │ - update(|data| ..)  │            │ - value()       │
//! └──────────────────────┘            └─────────────────┘
//! ```
//!
//! Edits are applied to a private copy and published whole, so readers see
//! either the old or the new data, never a half-edited lane.

use crate::mode::AutomationMode;
use crate::parameter::AutomationParameter;
use crate::track::TrackAutomationData;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;

/// Writer side. Cheap to clone; all clones publish to the same slot.
#[derive(Debug, Clone)]
pub struct SharedTrackAutomation {
    data: Arc<ArcSwap<TrackAutomationData>>,
}

impl SharedTrackAutomation {
    pub fn new(data: TrackAutomationData) -> Self {
        Self {
            data: Arc::new(ArcSwap::from_pointee(data)),
        }
    }

    /// Apply `edit` to a copy of the current data and publish it.
    ///
    /// Concurrent writers are serialised by retrying `edit` against the
    /// newer data, so it must not have side effects of its own.
    pub fn update<F>(&self, mut edit: F)
    where
        F: FnMut(&mut TrackAutomationData),
    {
        self.data.rcu(|current| {
            let mut next = TrackAutomationData::clone(current);
            edit(&mut next);
            next
        });
        debug!("Published automation snapshot");
    }

    /// Replace the data wholesale, e.g. after loading a project.
    pub fn replace(&self, data: TrackAutomationData) {
        self.data.store(Arc::new(data));
        debug!("Replaced automation snapshot");
    }

    /// The current published data.
    pub fn snapshot(&self) -> Arc<TrackAutomationData> {
        self.data.load_full()
    }

    pub fn reader(&self) -> AutomationReader {
        AutomationReader {
            data: Arc::clone(&self.data),
        }
    }
}

impl Default for SharedTrackAutomation {
    fn default() -> Self {
        Self::new(TrackAutomationData::new())
    }
}

/// Render-thread handle.
///
/// Every call loads the latest snapshot without locking or allocating.
#[derive(Debug, Clone)]
pub struct AutomationReader {
    data: Arc<ArcSwap<TrackAutomationData>>,
}

impl AutomationReader {
    #[inline]
    pub fn value(&self, parameter: AutomationParameter, beat: f64) -> Option<f32> {
        self.data.load().value(parameter, beat)
    }

    #[inline]
    pub fn mode(&self) -> AutomationMode {
        self.data.load().mode()
    }

    /// Render a block of `parameter` values from a single snapshot.
    ///
    /// Returns `false`, leaving `out` untouched, when the track has no such
    /// lane or its mode does not read.
    pub fn fill_block(
        &self,
        parameter: AutomationParameter,
        start_beat: f64,
        beats_per_frame: f64,
        out: &mut [f32],
    ) -> bool {
        let data = self.data.load();
        if !data.mode().can_read() {
            return false;
        }
        match data.lane(parameter) {
            Some(lane) => {
                lane.fill_block(start_beat, beats_per_frame, out);
                true
            }
            None => false,
        }
    }
}
