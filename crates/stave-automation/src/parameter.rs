//! The catalog of automatable parameters.

use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Grouping used by editors to order and colour lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterCategory {
    Mixer,
    MidiController,
    Synth,
}

impl ParameterCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mixer => "Mixer",
            Self::MidiController => "MIDI",
            Self::Synth => "Synth",
        }
    }
}

/// A parameter a lane can drive.
///
/// All values are normalised to `[0, 1]`; mapping to dB, Hz or pan law is
/// the consumer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutomationParameter {
    // Mixer
    Volume,
    Pan,
    EqLow,
    EqMid,
    EqHigh,
    Send1,
    Send2,

    // MIDI controllers
    ModWheel,
    Breath,
    FootController,
    MidiVolume,
    MidiPan,
    Expression,
    Sustain,
    FilterResonance,
    FilterCutoff,
    PitchBend,

    // Synth
    SynthCutoff,
    SynthResonance,
    SynthAttack,
    SynthRelease,
}

impl AutomationParameter {
    pub fn all() -> &'static [AutomationParameter] {
        use AutomationParameter::*;
        &[
            Volume,
            Pan,
            EqLow,
            EqMid,
            EqHigh,
            Send1,
            Send2,
            ModWheel,
            Breath,
            FootController,
            MidiVolume,
            MidiPan,
            Expression,
            Sustain,
            FilterResonance,
            FilterCutoff,
            PitchBend,
            SynthCutoff,
            SynthResonance,
            SynthAttack,
            SynthRelease,
        ]
    }

    /// Value a fresh lane reads before it has any points.
    pub fn default_value(&self) -> f32 {
        use AutomationParameter::*;
        match self {
            Volume => 0.8,
            Pan | EqLow | EqMid | EqHigh => 0.5,
            Send1 | Send2 => 0.0,
            ModWheel | Breath | FootController | Sustain => 0.0,
            MidiVolume => 100.0 / 127.0,
            MidiPan | FilterResonance | FilterCutoff | PitchBend => 0.5,
            Expression => 1.0,
            SynthCutoff => 1.0,
            SynthResonance | SynthAttack => 0.0,
            SynthRelease => 0.3,
        }
    }

    /// MIDI continuous-controller number. Pitch bend has its own message
    /// type and no CC.
    pub fn cc_number(&self) -> Option<u8> {
        use AutomationParameter::*;
        match self {
            ModWheel => Some(1),
            Breath => Some(2),
            FootController => Some(4),
            MidiVolume => Some(7),
            MidiPan => Some(10),
            Expression => Some(11),
            Sustain => Some(64),
            FilterResonance => Some(71),
            FilterCutoff => Some(74),
            _ => None,
        }
    }

    /// Reverse lookup of [`cc_number`](Self::cc_number).
    pub fn from_cc(cc: u8) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.cc_number() == Some(cc))
    }

    pub fn category(&self) -> ParameterCategory {
        use AutomationParameter::*;
        match self {
            Volume | Pan | EqLow | EqMid | EqHigh | Send1 | Send2 => ParameterCategory::Mixer,
            ModWheel | Breath | FootController | MidiVolume | MidiPan | Expression | Sustain
            | FilterResonance | FilterCutoff | PitchBend => ParameterCategory::MidiController,
            SynthCutoff | SynthResonance | SynthAttack | SynthRelease => ParameterCategory::Synth,
        }
    }

    /// Persisted identifier.
    pub fn as_str(&self) -> &'static str {
        use AutomationParameter::*;
        match self {
            Volume => "volume",
            Pan => "pan",
            EqLow => "eqLow",
            EqMid => "eqMid",
            EqHigh => "eqHigh",
            Send1 => "send1",
            Send2 => "send2",
            ModWheel => "modWheel",
            Breath => "breath",
            FootController => "footController",
            MidiVolume => "midiVolume",
            MidiPan => "midiPan",
            Expression => "expression",
            Sustain => "sustain",
            FilterResonance => "filterResonance",
            FilterCutoff => "filterCutoff",
            PitchBend => "pitchBend",
            SynthCutoff => "synthCutoff",
            SynthResonance => "synthResonance",
            SynthAttack => "synthAttack",
            SynthRelease => "synthRelease",
        }
    }

    pub fn display_name(&self) -> &'static str {
        use AutomationParameter::*;
        match self {
            Volume => "Volume",
            Pan => "Pan",
            EqLow => "EQ Low",
            EqMid => "EQ Mid",
            EqHigh => "EQ High",
            Send1 => "Send 1",
            Send2 => "Send 2",
            ModWheel => "Mod Wheel",
            Breath => "Breath",
            FootController => "Foot Controller",
            MidiVolume => "MIDI Volume",
            MidiPan => "MIDI Pan",
            Expression => "Expression",
            Sustain => "Sustain",
            FilterResonance => "Filter Resonance",
            FilterCutoff => "Filter Cutoff",
            PitchBend => "Pitch Bend",
            SynthCutoff => "Synth Cutoff",
            SynthResonance => "Synth Resonance",
            SynthAttack => "Synth Attack",
            SynthRelease => "Synth Release",
        }
    }

    /// Lane colour for new lanes, `#RRGGBB`.
    pub fn default_color_hex(&self) -> &'static str {
        use AutomationParameter::*;
        match self {
            Volume => "#4CAF50",
            Pan => "#2196F3",
            EqLow | EqMid | EqHigh => "#FF9800",
            Send1 | Send2 => "#9C27B0",
            ModWheel | Breath | FootController | Expression => "#00BCD4",
            MidiVolume | MidiPan => "#8BC34A",
            Sustain => "#795548",
            FilterResonance | FilterCutoff => "#E91E63",
            PitchBend => "#FFC107",
            SynthCutoff | SynthResonance => "#F44336",
            SynthAttack | SynthRelease => "#3F51B5",
        }
    }
}

impl fmt::Display for AutomationParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AutomationParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownParameter(s.to_string()))
    }
}
