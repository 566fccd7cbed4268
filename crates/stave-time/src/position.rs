//! Beat positions.

use crate::{BarPosition, Tempo, TimeSignature};
use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A point in musical time, in quarter-note beats.
///
/// Always finite and non-negative: construction clamps negative values to
/// zero and maps NaN to zero, and every arithmetic operation re-clamps. This
/// makes the type totally ordered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct BeatPosition {
    beats: f64,
}

impl BeatPosition {
    pub const ZERO: Self = Self { beats: 0.0 };

    #[inline]
    pub fn from_beats(beats: f64) -> Self {
        Self {
            beats: clamp_beats(beats),
        }
    }

    /// Convert a seconds-based time from an external source into beats.
    #[inline]
    pub fn from_seconds(seconds: f64, tempo: Tempo) -> Self {
        Self::from_beats(seconds * tempo.beats_per_second())
    }

    #[inline]
    pub fn beats(&self) -> f64 {
        self.beats
    }

    /// Seconds from the timeline origin at a constant tempo.
    #[inline]
    pub fn to_seconds(&self, tempo: Tempo) -> f64 {
        self.beats * tempo.seconds_per_beat()
    }

    /// Bar / beat / subdivision under the given meter.
    #[inline]
    pub fn decompose(&self, time_signature: TimeSignature) -> BarPosition {
        BarPosition::from_beats(self.beats, time_signature)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.beats == 0.0
    }
}

#[inline]
fn clamp_beats(beats: f64) -> f64 {
    // `<=` folds -0.0 into +0.0
    if beats.is_nan() || beats <= 0.0 {
        0.0
    } else {
        beats.min(f64::MAX)
    }
}

impl From<f64> for BeatPosition {
    fn from(beats: f64) -> Self {
        Self::from_beats(beats)
    }
}

impl From<BeatPosition> for f64 {
    fn from(pos: BeatPosition) -> Self {
        pos.beats
    }
}

impl PartialEq for BeatPosition {
    fn eq(&self, other: &Self) -> bool {
        self.beats == other.beats
    }
}

impl Eq for BeatPosition {}

impl PartialOrd for BeatPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BeatPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.beats.total_cmp(&other.beats)
    }
}

impl Add for BeatPosition {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_beats(self.beats + rhs.beats)
    }
}

impl Add<f64> for BeatPosition {
    type Output = Self;

    #[inline]
    fn add(self, beats: f64) -> Self {
        Self::from_beats(self.beats + beats)
    }
}

impl AddAssign<f64> for BeatPosition {
    #[inline]
    fn add_assign(&mut self, beats: f64) {
        *self = *self + beats;
    }
}

impl Sub for BeatPosition {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_beats(self.beats - rhs.beats)
    }
}

impl Sub<f64> for BeatPosition {
    type Output = Self;

    #[inline]
    fn sub(self, beats: f64) -> Self {
        Self::from_beats(self.beats - beats)
    }
}

impl SubAssign<f64> for BeatPosition {
    #[inline]
    fn sub_assign(&mut self, beats: f64) {
        *self = *self - beats;
    }
}

impl Mul<f64> for BeatPosition {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Self::from_beats(self.beats * factor)
    }
}

impl Div<f64> for BeatPosition {
    type Output = Self;

    /// Dividing by zero yields [`BeatPosition::ZERO`].
    #[inline]
    fn div(self, divisor: f64) -> Self {
        if divisor == 0.0 {
            return Self::ZERO;
        }
        Self::from_beats(self.beats / divisor)
    }
}
