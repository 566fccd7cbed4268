//! Tempo and tempo-relative durations.
//!
//! MIDI content is beat-locked: its beat positions and lengths never change
//! with tempo. Audio content is time-locked: its length in seconds is fixed
//! once recorded, so its length in beats has to follow the tempo.

use crate::BeatPosition;
use serde::{Deserialize, Serialize};

/// Tempo in beats per minute, clamped to `MIN_BPM..=MAX_BPM`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Tempo {
    bpm: f64,
}

impl Tempo {
    pub const MIN_BPM: f64 = 1.0;
    pub const MAX_BPM: f64 = 999.0;

    pub fn new(bpm: f64) -> Self {
        let bpm = if bpm.is_nan() {
            Self::default().bpm
        } else {
            bpm.clamp(Self::MIN_BPM, Self::MAX_BPM)
        };
        Self { bpm }
    }

    #[inline]
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    #[inline]
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    #[inline]
    pub fn beats_per_second(&self) -> f64 {
        self.bpm / 60.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: 120.0 }
    }
}

impl From<f64> for Tempo {
    fn from(bpm: f64) -> Self {
        Self::new(bpm)
    }
}

impl From<Tempo> for f64 {
    fn from(tempo: Tempo) -> Self {
        tempo.bpm
    }
}

/// How a region's duration reacts to tempo changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeBase {
    /// Symbolic (MIDI) content: fixed length in beats.
    #[default]
    BeatLocked,
    /// Sample-based (audio) content: fixed length in seconds.
    TimeLocked,
}

/// Placement and length of a timeline region, with the tempo its beat
/// length was last computed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawRegionTiming")]
pub struct RegionTiming {
    pub start: BeatPosition,
    duration_beats: f64,
    pub time_base: TimeBase,
    reference_tempo: Tempo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegionTiming {
    start: BeatPosition,
    duration_beats: f64,
    #[serde(default)]
    time_base: TimeBase,
    #[serde(default)]
    reference_tempo: Tempo,
}

impl From<RawRegionTiming> for RegionTiming {
    fn from(raw: RawRegionTiming) -> Self {
        Self::new(raw.start, raw.duration_beats, raw.time_base, raw.reference_tempo)
    }
}

impl RegionTiming {
    pub fn beat_locked(start: BeatPosition, duration_beats: f64, tempo: Tempo) -> Self {
        Self::new(start, duration_beats, TimeBase::BeatLocked, tempo)
    }

    pub fn time_locked(start: BeatPosition, duration_beats: f64, tempo: Tempo) -> Self {
        Self::new(start, duration_beats, TimeBase::TimeLocked, tempo)
    }

    pub fn new(
        start: BeatPosition,
        duration_beats: f64,
        time_base: TimeBase,
        reference_tempo: Tempo,
    ) -> Self {
        Self {
            start,
            duration_beats: BeatPosition::from_beats(duration_beats).beats(),
            time_base,
            reference_tempo,
        }
    }

    #[inline]
    pub fn duration_beats(&self) -> f64 {
        self.duration_beats
    }

    #[inline]
    pub fn reference_tempo(&self) -> Tempo {
        self.reference_tempo
    }

    #[inline]
    pub fn end(&self) -> BeatPosition {
        self.start + self.duration_beats
    }

    pub fn duration_seconds(&self, tempo: Tempo) -> f64 {
        self.duration_beats * tempo.seconds_per_beat()
    }

    /// React to a project tempo change.
    ///
    /// Beat-locked regions keep their beat length. Time-locked regions
    /// rescale it by `new / reference`, which holds their length in seconds,
    /// and adopt `new` as their reference. The start position is never
    /// moved. Returns `true` if the duration changed.
    pub fn apply_tempo_change(&mut self, new_tempo: Tempo) -> bool {
        match self.time_base {
            TimeBase::BeatLocked => false,
            TimeBase::TimeLocked => {
                let before = self.duration_beats;
                self.duration_beats =
                    recompute_duration_beats(self.duration_beats, self.reference_tempo, new_tempo);
                self.reference_tempo = new_tempo;
                self.duration_beats != before
            }
        }
    }
}

/// Beat length of time-locked content after a tempo change, keeping its
/// length in seconds: `duration_beats * (new / original)`. Identity when the
/// tempos match.
#[inline]
pub fn recompute_duration_beats(duration_beats: f64, original: Tempo, new: Tempo) -> f64 {
    if original == new {
        return duration_beats;
    }
    duration_beats * (new.bpm() / original.bpm())
}
