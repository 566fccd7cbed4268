//! Per-track automation container.

use crate::lane::AutomationLane;
use crate::mode::AutomationMode;
use crate::parameter::AutomationParameter;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All automation lanes of one track, at most one per parameter.
///
/// # Example
///
/// ```
/// use stave_automation::{AutomationMode, AutomationParameter, CurveType, TrackAutomationData};
///
/// let mut track = TrackAutomationData::new();
/// track.add_lane(AutomationParameter::Pan);
/// if let Some(lane) = track.lane_mut(AutomationParameter::Pan) {
///     lane.add_point(0.0, 0.0, CurveType::Linear);
///     lane.add_point(4.0, 1.0, CurveType::Linear);
/// }
///
/// assert_eq!(track.value(AutomationParameter::Pan, 4.0), Some(1.0));
/// assert_eq!(track.value(AutomationParameter::Volume, 4.0), None);
///
/// track.set_mode(AutomationMode::Off);
/// assert_eq!(track.value(AutomationParameter::Pan, 4.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTrackAutomationData")]
pub struct TrackAutomationData {
    lanes: Vec<AutomationLane>,
    mode: AutomationMode,
    is_expanded: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackAutomationData {
    #[serde(default)]
    lanes: Vec<AutomationLane>,
    #[serde(default)]
    mode: AutomationMode,
    #[serde(default)]
    is_expanded: bool,
}

impl From<RawTrackAutomationData> for TrackAutomationData {
    fn from(raw: RawTrackAutomationData) -> Self {
        let mut data = Self {
            lanes: Vec::with_capacity(raw.lanes.len()),
            mode: raw.mode,
            is_expanded: raw.is_expanded,
        };
        for lane in raw.lanes {
            if data.lane(lane.parameter()).is_some() {
                debug!("Dropping duplicate {} lane on load", lane.parameter().as_str());
                continue;
            }
            data.lanes.push(lane);
        }
        data
    }
}

impl Default for TrackAutomationData {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackAutomationData {
    pub fn new() -> Self {
        Self {
            lanes: Vec::new(),
            mode: AutomationMode::default(),
            is_expanded: false,
        }
    }

    pub fn lanes(&self) -> &[AutomationLane] {
        &self.lanes
    }

    pub fn visible_lanes(&self) -> impl Iterator<Item = &AutomationLane> {
        self.lanes.iter().filter(|lane| lane.is_visible())
    }

    pub fn lane(&self, parameter: AutomationParameter) -> Option<&AutomationLane> {
        self.lanes.iter().find(|lane| lane.parameter() == parameter)
    }

    pub fn lane_mut(&mut self, parameter: AutomationParameter) -> Option<&mut AutomationLane> {
        self.lanes
            .iter_mut()
            .find(|lane| lane.parameter() == parameter)
    }

    /// Automated value of `parameter` at `beat`.
    ///
    /// `None` when the mode does not read or the track has no such lane; the
    /// caller then keeps its manual value.
    pub fn value(&self, parameter: AutomationParameter, beat: f64) -> Option<f32> {
        if !self.mode.can_read() {
            return None;
        }
        self.lane(parameter).map(|lane| lane.value_at(beat))
    }

    /// `(parameter, value)` for every lane, empty when the mode does not read.
    pub fn values_at(&self, beat: f64) -> impl Iterator<Item = (AutomationParameter, f32)> + '_ {
        let lanes: &[AutomationLane] = if self.mode.can_read() {
            &self.lanes
        } else {
            &[]
        };
        lanes
            .iter()
            .map(move |lane| (lane.parameter(), lane.value_at(beat)))
    }

    /// Add a lane seeded with the catalog default. No-op if one exists.
    pub fn add_lane(&mut self, parameter: AutomationParameter) -> &mut AutomationLane {
        self.add_lane_with_current_value(parameter, parameter.default_value())
    }

    /// Add a lane that reads `current` until its first point, so enabling
    /// automation does not jump the live parameter. No-op if one exists.
    pub fn add_lane_with_current_value(
        &mut self,
        parameter: AutomationParameter,
        current: f32,
    ) -> &mut AutomationLane {
        let index = match self
            .lanes
            .iter()
            .position(|lane| lane.parameter() == parameter)
        {
            Some(index) => index,
            None => {
                debug!("Adding {} automation lane", parameter.as_str());
                self.lanes
                    .push(AutomationLane::with_initial_value(parameter, current));
                self.lanes.len() - 1
            }
        };
        &mut self.lanes[index]
    }

    pub fn remove_lane(&mut self, parameter: AutomationParameter) -> Option<AutomationLane> {
        let index = self
            .lanes
            .iter()
            .position(|lane| lane.parameter() == parameter)?;
        debug!("Removing {} automation lane", parameter.as_str());
        Some(self.lanes.remove(index))
    }

    #[inline]
    pub fn mode(&self) -> AutomationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AutomationMode) {
        if self.mode != mode {
            debug!("Automation mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
