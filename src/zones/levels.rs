//! Zones, threshold levels and measurement classification.
//!
//! # Bands
//! ```text
//!            GREEN       YELLOW       RED          MAX
//!   ───────────┼───────────┼───────────┼────────────┼──────────▶ dB
//!     GREEN       GREEN      YELLOW        RED          MAX
//! ```
//!
//! Each level is the lower edge of its zone. The GREEN level is the floor
//! of the quiet band, so anything below YELLOW stays GREEN.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::zones::error::ZoneError;

/// Smallest RMS value fed into the dB conversion.
pub const MIN_RMS: f64 = 1e-10;

/// One of the four severity bands, ordered from calm to loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    Green,
    Yellow,
    Red,
    Max,
}

impl Zone {
    /// All zones in ascending severity.
    pub const ALL: [Zone; 4] = [Zone::Green, Zone::Yellow, Zone::Red, Zone::Max];

    /// Wire label (`"GREEN"`, `"YELLOW"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Green => "GREEN",
            Zone::Yellow => "YELLOW",
            Zone::Red => "RED",
            Zone::Max => "MAX",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ZoneError;

    /// Labels are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.as_str() == s)
            .ok_or(ZoneError::InvalidLabel)
    }
}

/// The four threshold boundaries.
///
/// Only [`crate::zones::validator::validate`] and [`Levels::default`]
/// produce values that hold `GREEN < YELLOW < RED <= MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Levels {
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
    pub max: f64,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            green: -10.0,
            yellow: -5.0,
            red: -3.0,
            max: 0.0,
        }
    }
}

impl Levels {
    /// True when the levels respect `GREEN < YELLOW < RED <= MAX`.
    pub fn is_ordered(&self) -> bool {
        self.green < self.yellow && self.yellow < self.red && self.red <= self.max
    }

    /// Threshold for a single zone.
    pub fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Green => self.green,
            Zone::Yellow => self.yellow,
            Zone::Red => self.red,
            Zone::Max => self.max,
        }
    }

    /// Map a dB reading to the zone it falls in.
    pub fn classify(&self, db: f64) -> Zone {
        if db >= self.max {
            Zone::Max
        } else if db >= self.red {
            Zone::Red
        } else if db >= self.yellow {
            Zone::Yellow
        } else {
            Zone::Green
        }
    }
}

/// Convert an RMS amplitude (full scale = 1.0) to decibels.
pub fn rms_to_db(rms: f64) -> f64 {
    20.0 * rms.max(MIN_RMS).log10()
}
