use serde_json::{Map, Value};

use super::{
    AccentPattern, MetronomeConfig, MAX_POLY_BEATS, MAX_TRAINING_EVERY, MAX_TRAINING_STEP,
    MIN_POLY_BEATS, MIN_TRAINING_EVERY, MIN_TRAINING_STEP,
};
use crate::sequencing::{Subdivision, TimeSignature, MAX_BPM, MAX_SWING, MIN_BPM};

/// A partial configuration update
///
/// Every field is optional and validated on its own: numbers are clamped into
/// range, unknown meters become 4/4 and unknown subdivisions become eighths.
/// Nothing here is ever rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub bpm: Option<i64>,
    pub time_signature: Option<String>,
    pub subdivision: Option<String>,
    pub swing: Option<i64>,
    pub volume: Option<i64>,
    pub poly_enabled: Option<bool>,
    pub poly_beats: Option<i64>,
    pub poly_subdivision: Option<String>,
    pub poly_volume: Option<i64>,
    pub visual_pulse: Option<bool>,
    pub accent_pattern: Option<Vec<bool>>,
    pub training_mode: Option<bool>,
    pub training_step: Option<i64>,
    pub training_every: Option<i64>,
    pub tempo_lock: Option<bool>,
}

impl ConfigPatch {
    /// Pull whatever usable fields a JSON object carries (camelCase keys).
    ///
    /// Fields of the wrong type are skipped, the rest still apply.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            bpm: integer(object, "bpm"),
            time_signature: text(object, "timeSignature"),
            subdivision: text(object, "subdivision"),
            swing: integer(object, "swing"),
            volume: integer(object, "volume"),
            poly_enabled: flag(object, "polyEnabled"),
            poly_beats: integer(object, "polyBeats"),
            poly_subdivision: text(object, "polySubdivision"),
            poly_volume: integer(object, "polyVolume"),
            visual_pulse: flag(object, "visualPulse"),
            accent_pattern: flags(object, "accentPattern"),
            training_mode: flag(object, "trainingMode"),
            training_step: integer(object, "trainingStep"),
            training_every: integer(object, "trainingEvery"),
            tempo_lock: flag(object, "tempoLock"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn integer(object: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = object.get(key)?.as_f64()?;
    value.is_finite().then(|| value.round() as i64)
}

fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key)?.as_str().map(str::to_owned)
}

fn flag(object: &Map<String, Value>, key: &str) -> Option<bool> {
    object.get(key)?.as_bool()
}

// Non-boolean entries read as unaccented
fn flags(object: &Map<String, Value>, key: &str) -> Option<Vec<bool>> {
    let items = object.get(key)?.as_array()?;
    Some(items.iter().map(|v| v.as_bool().unwrap_or(false)).collect())
}

pub(crate) fn clamp_bpm(bpm: i64) -> u16 {
    bpm.clamp(MIN_BPM as i64, MAX_BPM as i64) as u16
}

fn clamp_percent(value: i64, max: u8) -> u8 {
    value.clamp(0, max as i64) as u8
}

impl MetronomeConfig {
    /// Merge a patch field by field.
    ///
    /// The tempo lock is checked as it stood before the patch, so a single
    /// patch can both set bpm and lock it, but cannot sneak a bpm past an
    /// existing lock.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        let was_locked = self.tempo_lock;

        if let Some(bpm) = patch.bpm {
            if !was_locked {
                self.bpm = clamp_bpm(bpm);
            }
        }

        if let Some(text) = &patch.time_signature {
            self.meter = TimeSignature::parse_lenient(text);
            self.accents.resize(self.meter.beats_per_measure());
        }

        if let Some(pattern) = &patch.accent_pattern {
            self.accents = AccentPattern::from_flags(pattern, self.meter.beats_per_measure());
        }

        if let Some(text) = &patch.subdivision {
            self.subdivision = Subdivision::parse_lenient(text);
        }
        if let Some(swing) = patch.swing {
            self.swing = clamp_percent(swing, MAX_SWING);
        }
        if let Some(volume) = patch.volume {
            self.volume = clamp_percent(volume, 100);
        }

        if let Some(enabled) = patch.poly_enabled {
            self.poly.enabled = enabled;
        }
        if let Some(beats) = patch.poly_beats {
            self.poly.beats = beats.clamp(MIN_POLY_BEATS as i64, MAX_POLY_BEATS as i64) as u8;
        }
        if let Some(text) = &patch.poly_subdivision {
            self.poly.subdivision = Subdivision::parse_lenient(text);
        }
        if let Some(volume) = patch.poly_volume {
            self.poly.volume = clamp_percent(volume, 100);
        }

        if let Some(visual_pulse) = patch.visual_pulse {
            self.visual_pulse = visual_pulse;
        }

        if let Some(enabled) = patch.training_mode {
            self.training.enabled = enabled;
        }
        if let Some(step) = patch.training_step {
            self.training.step =
                step.clamp(MIN_TRAINING_STEP as i64, MAX_TRAINING_STEP as i64) as u8;
        }
        if let Some(every) = patch.training_every {
            self.training.every =
                every.clamp(MIN_TRAINING_EVERY as i64, MAX_TRAINING_EVERY as i64) as u16;
        }

        if let Some(lock) = patch.tempo_lock {
            self.tempo_lock = lock;
        }
    }
}
