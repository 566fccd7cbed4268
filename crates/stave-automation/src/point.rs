//! Automation points and Bézier handles.

use crate::curve::CurveType;
use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Stable identity of an automation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(Uuid);

impl PointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PointId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Offset of a cubic Bézier handle from its anchor point.
///
/// Only `value_offset` shapes the evaluated curve; `beat_offset` is kept for
/// editors that draw the handle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawControlPoint")]
pub struct ControlPoint {
    beat_offset: f64,
    value_offset: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawControlPoint {
    #[serde(default)]
    beat_offset: f64,
    #[serde(default)]
    value_offset: f32,
}

impl From<RawControlPoint> for ControlPoint {
    fn from(raw: RawControlPoint) -> Self {
        Self::new(raw.beat_offset, raw.value_offset)
    }
}

impl ControlPoint {
    /// Non-finite offsets become zero; value offsets are limited to `[-1, 1]`.
    pub fn new(beat_offset: f64, value_offset: f32) -> Self {
        Self {
            beat_offset: if beat_offset.is_finite() { beat_offset } else { 0.0 },
            value_offset: if value_offset.is_finite() {
                value_offset.clamp(-1.0, 1.0)
            } else {
                0.0
            },
        }
    }

    #[inline]
    pub fn beat_offset(&self) -> f64 {
        self.beat_offset
    }

    #[inline]
    pub fn value_offset(&self) -> f32 {
        self.value_offset
    }
}

/// One keyframe of a parameter.
///
/// `value` lives in `[0, 1]` and `tension` in `[-1, 1]`; every write clamps.
/// The beat is only changed through the owning lane so that lane order
/// holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAutomationPoint")]
pub struct AutomationPoint {
    id: PointId,
    beat: f64,
    value: f32,
    curve: CurveType,
    tension: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    control_point_out: Option<ControlPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    control_point_in: Option<ControlPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAutomationPoint {
    #[serde(default)]
    id: PointId,
    beat: f64,
    value: f32,
    #[serde(default)]
    curve: CurveType,
    #[serde(default)]
    tension: f32,
    #[serde(default)]
    control_point_out: Option<ControlPoint>,
    #[serde(default)]
    control_point_in: Option<ControlPoint>,
}

impl From<RawAutomationPoint> for AutomationPoint {
    fn from(raw: RawAutomationPoint) -> Self {
        let mut point = Self::with_id(raw.id, raw.beat, raw.value, raw.curve);
        point.set_tension(raw.tension);
        point.set_control_points(raw.control_point_out, raw.control_point_in);
        if point.beat != raw.beat || point.value != raw.value || point.tension != raw.tension {
            debug!(
                "Clamped point {} on load (beat {} value {} tension {})",
                point.id, raw.beat, raw.value, raw.tension
            );
        }
        point
    }
}

impl AutomationPoint {
    pub fn new(beat: f64, value: f32) -> Self {
        Self::with_curve(beat, value, CurveType::Linear)
    }

    pub fn with_curve(beat: f64, value: f32, curve: CurveType) -> Self {
        Self::with_id(PointId::new(), beat, value, curve)
    }

    pub fn with_id(id: PointId, beat: f64, value: f32, curve: CurveType) -> Self {
        Self {
            id,
            beat: clamp_beat(beat),
            value: clamp_unit(value),
            curve,
            tension: 0.0,
            control_point_out: None,
            control_point_in: None,
        }
    }

    pub fn with_tension(mut self, tension: f32) -> Self {
        self.set_tension(tension);
        self
    }

    pub fn with_control_points(
        mut self,
        out: Option<ControlPoint>,
        inn: Option<ControlPoint>,
    ) -> Self {
        self.set_control_points(out, inn);
        self
    }

    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    #[inline]
    pub fn beat(&self) -> f64 {
        self.beat
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn curve(&self) -> CurveType {
        self.curve
    }

    #[inline]
    pub fn tension(&self) -> f32 {
        self.tension
    }

    #[inline]
    pub fn control_point_out(&self) -> Option<ControlPoint> {
        self.control_point_out
    }

    #[inline]
    pub fn control_point_in(&self) -> Option<ControlPoint> {
        self.control_point_in
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_unit(value);
    }

    pub fn set_curve(&mut self, curve: CurveType) {
        self.curve = curve;
    }

    pub fn set_tension(&mut self, tension: f32) {
        self.tension = if tension.is_nan() {
            0.0
        } else {
            tension.clamp(-1.0, 1.0)
        };
    }

    pub fn set_control_points(&mut self, out: Option<ControlPoint>, inn: Option<ControlPoint>) {
        self.control_point_out = out;
        self.control_point_in = inn;
    }

    pub(crate) fn set_beat(&mut self, beat: f64) {
        self.beat = clamp_beat(beat);
    }
}

#[inline]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
pub(crate) fn clamp_beat(beat: f64) -> f64 {
    stave_time::BeatPosition::from_beats(beat).beats()
}
