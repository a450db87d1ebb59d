//! User-adjustable metronome settings.
//!
//! `MetronomeConfig` is only ever changed through a [`ConfigPatch`], which
//! validates every field and keeps the accent pattern sized to the meter. A
//! scheduler pass borrows the whole config, so it never sees a half-applied
//! update.

mod accent;
mod patch;
mod snapshot;

pub use accent::AccentPattern;
pub use patch::ConfigPatch;
pub use snapshot::{ConfigSnapshot, SNAPSHOT_VERSION};

use crate::sequencing::{Subdivision, TimeSignature};

pub const DEFAULT_BPM: u16 = 120;
pub const DEFAULT_VOLUME: u8 = 70;

pub const MIN_POLY_BEATS: u8 = 2;
pub const MAX_POLY_BEATS: u8 = 12;

pub const MIN_TRAINING_STEP: u8 = 1;
pub const MAX_TRAINING_STEP: u8 = 50;
pub const MIN_TRAINING_EVERY: u16 = 1;
pub const MAX_TRAINING_EVERY: u16 = 64;

/// Secondary click stream laid over the main measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyrhythmConfig {
    pub enabled: bool,
    /// Pulses per main measure (2-12)
    pub beats: u8,
    pub subdivision: Subdivision,
    /// Percent (0-100), used as click intensity
    pub volume: u8,
}

impl Default for PolyrhythmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            beats: 3,
            subdivision: Subdivision::Quarter,
            volume: 80,
        }
    }
}

/// Automatic tempo ramp: raise bpm by `step` every `every` measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingConfig {
    pub enabled: bool,
    pub step: u8,
    pub every: u16,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            step: 5,
            every: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetronomeConfig {
    bpm: u16,
    meter: TimeSignature,
    subdivision: Subdivision,
    swing: u8,
    volume: u8,
    poly: PolyrhythmConfig,
    visual_pulse: bool,
    accents: AccentPattern,
    training: TrainingConfig,
    tempo_lock: bool,
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        let meter = TimeSignature::FOUR_FOUR;
        Self {
            bpm: DEFAULT_BPM,
            meter,
            subdivision: Subdivision::Eighth,
            swing: 0,
            volume: DEFAULT_VOLUME,
            poly: PolyrhythmConfig::default(),
            visual_pulse: true,
            accents: AccentPattern::downbeat_only(meter.beats_per_measure()),
            training: TrainingConfig::default(),
            tempo_lock: false,
        }
    }
}

impl MetronomeConfig {
    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn meter(&self) -> TimeSignature {
        self.meter
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    /// Swing amount in percent (0-75)
    pub fn swing(&self) -> u8 {
        self.swing
    }

    /// Master volume in percent (0-100)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn poly(&self) -> &PolyrhythmConfig {
        &self.poly
    }

    pub fn visual_pulse(&self) -> bool {
        self.visual_pulse
    }

    pub fn accents(&self) -> &AccentPattern {
        &self.accents
    }

    pub fn training(&self) -> &TrainingConfig {
        &self.training
    }

    pub fn tempo_locked(&self) -> bool {
        self.tempo_lock
    }

    /// Master gain for the synthesizer (volume percent scaled to 0.0-1.0)
    pub fn master_level(&self) -> f32 {
        self.volume as f32 / 100.0
    }

    /// Set bpm from an automatic source (training ramp, tap tempo).
    /// Returns false when the tempo is locked.
    pub(crate) fn set_bpm_unlocked(&mut self, bpm: i64) -> bool {
        if self.tempo_lock {
            return false;
        }
        self.bpm = patch::clamp_bpm(bpm);
        true
    }

    pub(crate) fn toggle_accent(&mut self, beat: usize) {
        self.accents.toggle(beat);
    }
}
