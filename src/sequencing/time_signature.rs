use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Time signature (meter) of the main click stream
///
/// Serialized as its "top/bottom" text form, e.g. `"7/8"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per measure (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time, also the fallback for anything unparseable
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature {
        numerator: 3,
        denominator: 4,
    };

    /// 6/8 time (compound duple)
    pub const SIX_EIGHT: TimeSignature = TimeSignature {
        numerator: 6,
        denominator: 8,
    };

    /// 7/8 time
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature {
        numerator: 7,
        denominator: 8,
    };

    pub const MAX_BEATS: u8 = 32;
    const BEAT_UNITS: [u8; 6] = [1, 2, 4, 8, 16, 32];

    /// Create a time signature, falling back to 4/4 when either part is out of range
    pub fn new(numerator: u8, denominator: u8) -> Self {
        if (1..=Self::MAX_BEATS).contains(&numerator) && Self::BEAT_UNITS.contains(&denominator) {
            Self {
                numerator,
                denominator,
            }
        } else {
            Self::FOUR_FOUR
        }
    }

    /// Parse a "top/bottom" string. Never fails: malformed input yields 4/4.
    pub fn parse_lenient(text: &str) -> Self {
        text.parse().unwrap_or(Self::FOUR_FOUR)
    }

    /// Beats per measure, never zero
    pub fn beats_per_measure(&self) -> usize {
        self.numerator.max(1) as usize
    }

    /// Length of one beat in quarter notes (4/4 -> 1.0, 6/8 -> 0.5, 2/2 -> 2.0)
    pub fn quarters_per_beat(&self) -> f64 {
        4.0 / self.denominator.max(1) as f64
    }

    /// Length of one measure in quarter notes
    pub fn quarters_per_measure(&self) -> f64 {
        self.quarters_per_beat() * self.beats_per_measure() as f64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTimeSignature;

impl FromStr for TimeSignature {
    type Err = InvalidTimeSignature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (top, bottom) = s.trim().split_once('/').ok_or(InvalidTimeSignature)?;
        let numerator: u8 = top.trim().parse().map_err(|_| InvalidTimeSignature)?;
        let denominator: u8 = bottom.trim().parse().map_err(|_| InvalidTimeSignature)?;

        let candidate = Self::new(numerator, denominator);
        if candidate.numerator == numerator && candidate.denominator == denominator {
            Ok(candidate)
        } else {
            Err(InvalidTimeSignature)
        }
    }
}

impl Serialize for TimeSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&text))
    }
}
