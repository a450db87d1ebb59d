use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many clicks each beat is divided into
///
/// Serialized with the short text form (`"1/8"`, `"1/8T"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subdivision {
    Quarter,
    #[default]
    Eighth,
    EighthTriplet,
    Sixteenth,
    SixteenthTriplet,
    ThirtySecond,
    ThirtySecondTriplet,
    SixtyFourth,
}

impl Subdivision {
    pub const ALL: [Subdivision; 8] = [
        Subdivision::Quarter,
        Subdivision::Eighth,
        Subdivision::EighthTriplet,
        Subdivision::Sixteenth,
        Subdivision::SixteenthTriplet,
        Subdivision::ThirtySecond,
        Subdivision::ThirtySecondTriplet,
        Subdivision::SixtyFourth,
    ];

    /// Number of scheduler steps per beat
    pub const fn steps_per_beat(self) -> usize {
        match self {
            Subdivision::Quarter => 1,
            Subdivision::Eighth => 2,
            Subdivision::EighthTriplet => 3,
            Subdivision::Sixteenth => 4,
            Subdivision::SixteenthTriplet => 6,
            Subdivision::ThirtySecond => 8,
            Subdivision::ThirtySecondTriplet => 12,
            Subdivision::SixtyFourth => 16,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Subdivision::Quarter => "1/4",
            Subdivision::Eighth => "1/8",
            Subdivision::EighthTriplet => "1/8T",
            Subdivision::Sixteenth => "1/16",
            Subdivision::SixteenthTriplet => "1/16T",
            Subdivision::ThirtySecond => "1/32",
            Subdivision::ThirtySecondTriplet => "1/32T",
            Subdivision::SixtyFourth => "1/64",
        }
    }

    /// Parse either the short label or the long name. Unknown input yields eighths.
    pub fn parse_lenient(text: &str) -> Self {
        let key = text.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "1/4" | "quarter" => Subdivision::Quarter,
            "1/8" | "eighth" => Subdivision::Eighth,
            "1/8t" | "eighth-triplet" => Subdivision::EighthTriplet,
            "1/16" | "sixteenth" => Subdivision::Sixteenth,
            "1/16t" | "sixteenth-triplet" => Subdivision::SixteenthTriplet,
            "1/32" | "thirty-second" => Subdivision::ThirtySecond,
            "1/32t" | "thirty-second-triplet" => Subdivision::ThirtySecondTriplet,
            "1/64" | "sixty-fourth" => Subdivision::SixtyFourth,
            _ => Subdivision::Eighth,
        }
    }

    /// The next subdivision in table order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Subdivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Subdivision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Subdivision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&text))
    }
}
