//! Per-track automation mode.
//!
//! | Mode  | Reads lanes | Records |
//! |-------|-------------|---------|
//! | Off   | no          | no      |
//! | Read  | yes         | no      |
//! | Touch | yes         | yes     |
//! | Latch | yes         | yes     |
//! | Write | yes         | yes     |
//!
//! When recording starts and stops (touch release, latch hold) is decided
//! by the recorder, not here.

use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationMode {
    Off,
    #[default]
    Read,
    Touch,
    Latch,
    Write,
}

impl AutomationMode {
    #[must_use]
    #[inline]
    pub fn can_read(&self) -> bool {
        !matches!(self, Self::Off)
    }

    #[must_use]
    #[inline]
    pub fn can_record(&self) -> bool {
        matches!(self, Self::Touch | Self::Latch | Self::Write)
    }

    #[must_use]
    pub fn all() -> &'static [AutomationMode] {
        &[Self::Off, Self::Read, Self::Touch, Self::Latch, Self::Write]
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Read => "read",
            Self::Touch => "touch",
            Self::Latch => "latch",
            Self::Write => "write",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Read => "Read",
            Self::Touch => "Touch",
            Self::Latch => "Latch",
            Self::Write => "Write",
        }
    }

    #[must_use]
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Read => "RD",
            Self::Touch => "TCH",
            Self::Latch => "LCH",
            Self::Write => "WRT",
        }
    }
}

impl fmt::Display for AutomationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AutomationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}
