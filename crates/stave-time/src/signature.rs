//! Time signatures and bar/beat decomposition.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Musical meter, `numerator / denominator`.
///
/// Both fields are clamped to at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTimeSignature")]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct RawTimeSignature {
    numerator: u32,
    denominator: u32,
}

impl From<RawTimeSignature> for TimeSignature {
    fn from(raw: RawTimeSignature) -> Self {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl TimeSignature {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator: if numerator == 0 { 1 } else { numerator },
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    #[inline]
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Bar length in quarter-note beats (7/8 → 3.5).
    #[inline]
    pub fn beats_per_bar(&self) -> f64 {
        self.numerator as f64 * 4.0 / self.denominator as f64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A beat position split into 1-indexed bar and beat plus a 0..=99 subdivision.
///
/// Bars count `numerator` beats each, regardless of the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarPosition {
    pub bar: u32,
    pub beat: u32,
    pub subdivision: u32,
}

impl BarPosition {
    pub const SUBDIVISIONS_PER_BEAT: u32 = 100;

    pub fn new(bar: u32, beat: u32, subdivision: u32) -> Self {
        Self {
            bar: bar.max(1),
            beat: beat.max(1),
            subdivision: subdivision.min(Self::SUBDIVISIONS_PER_BEAT - 1),
        }
    }

    pub fn from_beats(beats: f64, time_signature: TimeSignature) -> Self {
        let beats = if beats.is_finite() { beats.max(0.0) } else { 0.0 };
        let per_bar = time_signature.numerator() as f64;

        let bar = (beats / per_bar).floor();
        let beat_in_bar = (beats % per_bar).floor();
        let subdivision = (beats.fract() * Self::SUBDIVISIONS_PER_BEAT as f64).floor();

        Self::new(bar as u32 + 1, beat_in_bar as u32 + 1, subdivision as u32)
    }

    pub fn to_beats(&self, time_signature: TimeSignature) -> f64 {
        let per_bar = time_signature.numerator() as f64;
        (self.bar.saturating_sub(1)) as f64 * per_bar
            + (self.beat.saturating_sub(1)) as f64
            + self.subdivision as f64 / Self::SUBDIVISIONS_PER_BEAT as f64
    }
}

impl Default for BarPosition {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for BarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{:02}", self.bar, self.beat, self.subdivision)
    }
}
