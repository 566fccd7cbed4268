//! Segment interpolation between two automation points.

use crate::point::{clamp_unit, AutomationPoint, ControlPoint};
use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Default horizontal reach of a Bézier handle, as a fraction of the segment.
pub const DEFAULT_HANDLE_REACH: f64 = 0.33;

/// Shape of the segment leaving a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveType {
    #[default]
    Linear,
    /// Smootherstep ease in and out.
    Smooth,
    /// Hold the start value until the next point.
    Step,
    Exponential,
    Logarithmic,
    /// Steep logistic transition around the segment midpoint.
    SCurve,
}

impl CurveType {
    pub fn all() -> &'static [CurveType] {
        &[
            CurveType::Linear,
            CurveType::Smooth,
            CurveType::Step,
            CurveType::Exponential,
            CurveType::Logarithmic,
            CurveType::SCurve,
        ]
    }

    /// Persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveType::Linear => "linear",
            CurveType::Smooth => "smooth",
            CurveType::Step => "step",
            CurveType::Exponential => "exponential",
            CurveType::Logarithmic => "logarithmic",
            CurveType::SCurve => "sCurve",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CurveType::Linear => "Linear",
            CurveType::Smooth => "Smooth",
            CurveType::Step => "Step",
            CurveType::Exponential => "Exponential",
            CurveType::Logarithmic => "Logarithmic",
            CurveType::SCurve => "S-Curve",
        }
    }

    /// Normalised progress `0..=1` through a segment at fraction `t`.
    ///
    /// Applies the tension warp first (not for `Step`), then the family
    /// shape. Useful for drawing curve previews.
    pub fn ease(&self, t: f32, tension: f32) -> f32 {
        let t = clamp_unit(t);
        let tension = if tension.is_nan() {
            0.0
        } else {
            tension.clamp(-1.0, 1.0)
        };

        match self {
            CurveType::Step => 0.0,
            CurveType::Linear => warp(t, tension),
            CurveType::Smooth => {
                let w = warp(t, tension);
                w * w * w * (w * (w * 6.0 - 15.0) + 10.0)
            }
            CurveType::Exponential => warp(t, tension).powf(2.5),
            CurveType::Logarithmic => 1.0 - (1.0 - warp(t, tension)).powf(2.5),
            CurveType::SCurve => logistic(warp(t, tension), tension),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CurveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CurveType::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownCurve(s.to_string()))
    }
}

/// Tension pre-warp of the segment fraction.
///
/// Positive tension pulls toward an ease-in-out power curve, negative
/// tension toward linear-from-smoothstep. Zero is the identity.
pub fn warp(t: f32, tension: f32) -> f32 {
    if tension > 0.0 {
        let power = 1.0 + tension * 2.0;
        let eased = if t < 0.5 {
            0.5 * (2.0 * t).powf(power)
        } else {
            1.0 - 0.5 * (2.0 * (1.0 - t)).powf(power)
        };
        t + (eased - t) * tension
    } else if tension < 0.0 {
        let s = t * t * (3.0 - 2.0 * t);
        s + (t - s) * tension.abs()
    } else {
        t
    }
}

fn logistic(t: f32, tension: f32) -> f32 {
    let k = 10.0 * (1.0 + tension.abs() as f64 * 2.0);
    let f = |x: f64| 1.0 / (1.0 + (-k * (x - 0.5)).exp());
    let (lo, hi) = (f(0.0), f(1.0));
    ((f(t as f64) - lo) / (hi - lo)) as f32
}

/// Value of the segment `p1 → p2` at `beat`.
///
/// The caller brackets `p1.beat() <= beat < p2.beat()`. A zero-length segment
/// yields `p2`'s value. An outgoing handle on `p1` or an incoming handle on
/// `p2` makes the segment a cubic Bézier, overriding `p1`'s curve family and
/// tension. Handles facing away from the segment are ignored.
pub fn evaluate_segment(p1: &AutomationPoint, p2: &AutomationPoint, beat: f64) -> f32 {
    let span = p2.beat() - p1.beat();
    if span <= 0.0 || !span.is_finite() {
        return p2.value();
    }

    let t = ((beat - p1.beat()) / span).clamp(0.0, 1.0) as f32;

    let (out, inn) = (p1.control_point_out(), p2.control_point_in());
    if out.is_some() || inn.is_some() {
        let out = out.unwrap_or_else(|| ControlPoint::new(span * DEFAULT_HANDLE_REACH, 0.0));
        let inn = inn.unwrap_or_else(|| ControlPoint::new(-span * DEFAULT_HANDLE_REACH, 0.0));
        let c1 = p1.value() + out.value_offset();
        let c2 = p2.value() + inn.value_offset();
        return clamp_unit(cubic_bezier(t, p1.value(), c1, c2, p2.value()));
    }

    if p1.curve() == CurveType::Step {
        return p1.value();
    }

    let delta = p2.value() - p1.value();
    clamp_unit(p1.value() + delta * p1.curve().ease(t, p1.tension()))
}

#[inline]
fn cubic_bezier(t: f32, p0: f32, c1: f32, c2: f32, p3: f32) -> f32 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t * p3
}
