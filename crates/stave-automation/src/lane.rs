//! Automation lanes: a sorted point list for one parameter.

use crate::curve::{self, CurveType};
use crate::parameter::AutomationParameter;
use crate::point::{clamp_unit, AutomationPoint, ControlPoint, PointId};
use crate::Result;
use core::fmt;
use serde::{Deserialize, Serialize, Serializer};
use stave_time::{GridResolution, TimeSignature};
use tracing::debug;
use uuid::Uuid;

/// Stable identity of an automation lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneId(Uuid);

impl LaneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LaneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Points kept in non-decreasing beat order.
///
/// The backing `Vec` is never handed out mutably, so every path that moves
/// a point in time goes through [`PointList::insert`] or a re-sort.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<AutomationPoint>")]
pub struct PointList {
    points: Vec<AutomationPoint>,
}

impl From<Vec<AutomationPoint>> for PointList {
    fn from(points: Vec<AutomationPoint>) -> Self {
        let mut list = Self { points };
        if list.points.windows(2).any(|w| w[0].beat() > w[1].beat()) {
            debug!("Re-sorting {} out-of-order points on load", list.points.len());
            list.resort();
        }
        list
    }
}

impl Serialize for PointList {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.points.serialize(serializer)
    }
}

impl PointList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[AutomationPoint] {
        &self.points
    }

    pub fn iter(&self) -> core::slice::Iter<'_, AutomationPoint> {
        self.points.iter()
    }

    pub fn get(&self, id: PointId) -> Option<&AutomationPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    /// Insert after every point at the same or an earlier beat.
    ///
    /// Returns the index the point landed at.
    pub fn insert(&mut self, point: AutomationPoint) -> usize {
        let index = self.points.partition_point(|p| p.beat() <= point.beat());
        self.points.insert(index, point);
        index
    }

    pub fn remove(&mut self, id: PointId) -> Option<AutomationPoint> {
        let index = self.position(id)?;
        Some(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Points with `start <= beat < end`.
    pub fn range(&self, start: f64, end: f64) -> &[AutomationPoint] {
        if start.is_nan() || end.is_nan() || end <= start {
            return &[];
        }
        let from = self.points.partition_point(|p| p.beat() < start);
        let to = self.points.partition_point(|p| p.beat() < end);
        &self.points[from..to.max(from)]
    }

    pub fn first_beat(&self) -> Option<f64> {
        self.points.first().map(AutomationPoint::beat)
    }

    pub fn last_beat(&self) -> Option<f64> {
        self.points.last().map(AutomationPoint::beat)
    }

    fn position(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    /// Mutable access for edits that leave the beat untouched.
    fn get_mut(&mut self, id: PointId) -> Option<&mut AutomationPoint> {
        self.points.iter_mut().find(|p| p.id() == id)
    }

    /// Rewrite every beat, then restore order. Equal beats keep their
    /// relative order.
    fn map_beats(&mut self, mut f: impl FnMut(f64) -> f64) {
        for point in &mut self.points {
            point.set_beat(f(point.beat()));
        }
        self.resort();
    }

    fn retain(&mut self, f: impl FnMut(&AutomationPoint) -> bool) {
        self.points.retain(f);
    }

    fn resort(&mut self) {
        self.points.sort_by(|a, b| a.beat().total_cmp(&b.beat()));
    }
}

impl<'a> IntoIterator for &'a PointList {
    type Item = &'a AutomationPoint;
    type IntoIter = core::slice::Iter<'a, AutomationPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Automation for a single parameter of a track.
///
/// Values in and out are normalised to `[0, 1]`. Before the first point the
/// lane reads `initial_value` (when set) or the first point's value; after
/// the last point it holds the last value.
///
/// # Example
///
/// ```
/// use stave_automation::{AutomationLane, AutomationParameter, CurveType};
///
/// let mut lane = AutomationLane::new(AutomationParameter::Volume);
/// lane.add_point(0.0, 0.2, CurveType::Linear);
/// lane.add_point(4.0, 0.8, CurveType::Linear);
///
/// assert!((lane.value_at(2.0) - 0.5).abs() < 1e-6);
/// assert_eq!(lane.value_at(10.0), 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAutomationLane")]
pub struct AutomationLane {
    id: LaneId,
    parameter: AutomationParameter,
    points: PointList,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_value: Option<f32>,
    is_visible: bool,
    is_locked: bool,
    color_hex: String,
    height: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAutomationLane {
    #[serde(default)]
    id: LaneId,
    parameter: AutomationParameter,
    #[serde(default)]
    points: PointList,
    #[serde(default)]
    initial_value: Option<f32>,
    #[serde(default = "default_true")]
    is_visible: bool,
    #[serde(default)]
    is_locked: bool,
    #[serde(default)]
    color_hex: Option<String>,
    #[serde(default = "default_height")]
    height: f32,
}

fn default_true() -> bool {
    true
}

fn default_height() -> f32 {
    AutomationLane::DEFAULT_HEIGHT
}

impl From<RawAutomationLane> for AutomationLane {
    fn from(raw: RawAutomationLane) -> Self {
        let mut lane = Self::new(raw.parameter);
        lane.id = raw.id;
        lane.points = raw.points;
        lane.initial_value = raw.initial_value.map(clamp_unit);
        lane.is_visible = raw.is_visible;
        lane.is_locked = raw.is_locked;
        if let Some(color) = raw.color_hex {
            lane.color_hex = color;
        }
        lane.set_height(raw.height);
        if lane.height != raw.height || lane.initial_value != raw.initial_value {
            debug!(
                "Clamped {} lane on load (height {} initial value {:?})",
                lane.parameter.as_str(),
                raw.height,
                raw.initial_value
            );
        }
        lane
    }
}

impl AutomationLane {
    pub const MIN_HEIGHT: f32 = 40.0;
    pub const MAX_HEIGHT: f32 = 500.0;
    pub const DEFAULT_HEIGHT: f32 = 60.0;

    /// Empty lane using the parameter's catalog colour.
    pub fn new(parameter: AutomationParameter) -> Self {
        Self {
            id: LaneId::new(),
            parameter,
            points: PointList::new(),
            initial_value: None,
            is_visible: true,
            is_locked: false,
            color_hex: parameter.default_color_hex().to_string(),
            height: Self::DEFAULT_HEIGHT,
        }
    }

    /// Empty lane that reads `value` until its first point.
    pub fn with_initial_value(parameter: AutomationParameter, value: f32) -> Self {
        let mut lane = Self::new(parameter);
        lane.initial_value = Some(clamp_unit(value));
        lane
    }

    #[inline]
    pub fn id(&self) -> LaneId {
        self.id
    }

    #[inline]
    pub fn parameter(&self) -> AutomationParameter {
        self.parameter
    }

    #[inline]
    pub fn points(&self) -> &PointList {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: PointId) -> Option<&AutomationPoint> {
        self.points.get(id)
    }

    pub fn first_beat(&self) -> Option<f64> {
        self.points.first_beat()
    }

    pub fn last_beat(&self) -> Option<f64> {
        self.points.last_beat()
    }

    /// Points with `start <= beat < end`.
    pub fn points_in_range(&self, start: f64, end: f64) -> &[AutomationPoint] {
        self.points.range(start, end)
    }

    #[inline]
    pub fn initial_value(&self) -> Option<f32> {
        self.initial_value
    }

    pub fn set_initial_value(&mut self, value: Option<f32>) {
        self.initial_value = value.map(clamp_unit);
    }

    /// Lane value at `beat`, always in `[0, 1]`.
    ///
    /// Binary search over the sorted points; never allocates or locks.
    pub fn value_at(&self, beat: f64) -> f32 {
        let points = self.points.as_slice();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return self
                .initial_value
                .unwrap_or_else(|| self.parameter.default_value());
        };

        // NaN falls through to the first point rather than poisoning the search
        if beat.is_nan() || beat < first.beat() {
            return self.initial_value.unwrap_or(first.value());
        }
        if beat >= last.beat() {
            return last.value();
        }

        let index = points.partition_point(|p| p.beat() <= beat);
        curve::evaluate_segment(&points[index - 1], &points[index], beat)
    }

    /// Value with loop wrapping: beats at or past `loop_end` fold back into
    /// `[loop_start, loop_end)`.
    pub fn value_looped(&self, beat: f64, loop_start: f64, loop_end: f64) -> f32 {
        let loop_len = loop_end - loop_start;
        if loop_len.is_nan() || loop_len <= 0.0 || beat < loop_end {
            return self.value_at(beat);
        }
        self.value_at(loop_start + (beat - loop_start) % loop_len)
    }

    /// Render consecutive values into `out`, one every `beats_per_frame`.
    pub fn fill_block(&self, start_beat: f64, beats_per_frame: f64, out: &mut [f32]) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.value_at(start_beat + i as f64 * beats_per_frame);
        }
    }

    /// Add a point and return its id.
    pub fn add_point(&mut self, beat: f64, value: f32, curve: CurveType) -> PointId {
        self.add_point_with(AutomationPoint::with_curve(beat, value, curve))
    }

    /// Add a fully specified point, keeping its id.
    pub fn add_point_with(&mut self, point: AutomationPoint) -> PointId {
        let id = point.id();
        self.points.insert(point);
        id
    }

    /// Move and/or revalue a point. Unknown ids are ignored.
    pub fn update_point(&mut self, id: PointId, beat: Option<f64>, value: Option<f32>) {
        match beat {
            Some(beat) => {
                let Some(mut point) = self.points.remove(id) else {
                    return;
                };
                point.set_beat(beat);
                if let Some(value) = value {
                    point.set_value(value);
                }
                self.points.insert(point);
            }
            None => {
                if let (Some(point), Some(value)) = (self.points.get_mut(id), value) {
                    point.set_value(value);
                }
            }
        }
    }

    pub fn remove_point(&mut self, id: PointId) -> Option<AutomationPoint> {
        self.points.remove(id)
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn set_point_curve(&mut self, id: PointId, curve: CurveType) {
        if let Some(point) = self.points.get_mut(id) {
            point.set_curve(curve);
        }
    }

    pub fn set_point_tension(&mut self, id: PointId, tension: f32) {
        if let Some(point) = self.points.get_mut(id) {
            point.set_tension(tension);
        }
    }

    pub fn set_control_points(
        &mut self,
        id: PointId,
        out: Option<ControlPoint>,
        inn: Option<ControlPoint>,
    ) {
        if let Some(point) = self.points.get_mut(id) {
            point.set_control_points(out, inn);
        }
    }

    /// Snap every point to the grid.
    pub fn quantize_points(&mut self, resolution: GridResolution, time_signature: TimeSignature) {
        self.points
            .map_beats(|beat| resolution.quantize(beat, time_signature));
    }

    /// Move every point by `delta` beats. Points pushed before zero pile up at zero.
    pub fn shift_points(&mut self, delta: f64) {
        if !delta.is_finite() || delta == 0.0 {
            return;
        }
        self.points.map_beats(|beat| beat + delta);
    }

    /// Remove points with `start <= beat < end`, returning how many went.
    pub fn remove_points_in_range(&mut self, start: f64, end: f64) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !(p.beat() >= start && p.beat() < end));
        before - self.points.len()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    /// Editor lock. Purely presentational; edits through this API still apply.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.is_locked = locked;
    }

    #[inline]
    pub fn color_hex(&self) -> &str {
        &self.color_hex
    }

    pub fn set_color_hex(&mut self, color: impl Into<String>) {
        self.color_hex = color.into();
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = if height.is_nan() {
            Self::DEFAULT_HEIGHT
        } else {
            height.clamp(Self::MIN_HEIGHT, Self::MAX_HEIGHT)
        };
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
