use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Click Envelope
==============

A click is a percussive event: it has no sustain and no note-off. The
envelope below is the whole life of one click, triggered once and left to
run out on its own.

Vocabulary
----------

  peak        The loudest level reached, set per click from accent and
              intensity (accented 0.9, regular 0.7, times intensity).

  floor       The near-silent level the decay aims for. An exponential
              curve never reaches zero, so it stops at FLOOR instead.

  tail        A short hold at the floor before the voice is released. The
              tone generator keeps running for it, then stops.


The Shape
---------

  Level
  peak ┐ ╱╲
       │╱  ╲
       │    ╲_
       │      ‾‾──____
 floor └───────────────────────┐
       │ A │      D       │ T  └─ Idle
        3ms      60ms      20ms

Attack is a straight line from 0 to peak. Decay is exponential: each sample
multiplies the level by the same ratio, chosen so that after `decay_samples`
samples the level lands on the floor:

    ratio = (floor / peak) ^ (1 / decay_samples)

This matches how struck objects die away and avoids the "ramp" sound a
linear decay has at the end of short tones.


The State Machine
-----------------

    ┌──────┐ note_on ┌────────┐ level=peak ┌───────┐ n=decay ┌──────┐ n=tail ┌──────┐
    │ Idle │ ──────→ │ Attack │ ─────────→ │ Decay │ ──────→ │ Tail │ ─────→ │ Idle │
    └──────┘         └────────┘            └───────┘         └──────┘        └──────┘

A new note_on restarts from zero in any stage.
*/

pub const ATTACK_TIME: f32 = 0.003;
pub const DECAY_TIME: f32 = 0.060;
pub const TAIL_TIME: f32 = 0.020;
pub const FLOOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Tail,
}

pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    tail_time: f32,

    stage: EnvelopeState,
    level: f32,
    peak: f32,
    floor: f32,

    // Per-stage bookkeeping, computed at note_on
    elapsed: u32,
    attack_samples: u32,
    decay_samples: u32,
    tail_samples: u32,
    decay_ratio: f32,
}

impl Envelope {
    pub fn click() -> Self {
        Self::with_times(ATTACK_TIME, DECAY_TIME, TAIL_TIME)
    }

    pub fn with_times(attack: f32, decay: f32, tail: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            tail_time: tail.max(0.0),

            stage: EnvelopeState::Idle,
            level: 0.0,
            peak: 0.0,
            floor: 0.0,
            elapsed: 0,
            attack_samples: 1,
            decay_samples: 1,
            tail_samples: 0,
            decay_ratio: 1.0,
        }
    }

    /// Start a click. `ctx.velocity` is the peak level (0.0 - 1.0).
    pub fn note_on(&mut self, ctx: &RenderCtx) {
        let to_samples = |secs: f32| (secs * ctx.sample_rate).round() as u32;

        self.peak = ctx.velocity.clamp(0.0, 1.0);
        self.floor = FLOOR.min(self.peak);
        self.attack_samples = to_samples(self.attack_time).max(1);
        self.decay_samples = to_samples(self.decay_time).max(1);
        self.tail_samples = to_samples(self.tail_time);
        self.decay_ratio = if self.peak > 0.0 {
            (self.floor / self.peak).powf(1.0 / self.decay_samples as f32)
        } else {
            0.0
        };

        self.level = 0.0;
        self.elapsed = 0;
        self.stage = EnvelopeState::Attack;
    }

    /// Advance the envelope by one sample.
    pub fn next_sample(&mut self) {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.elapsed += 1;
                self.level = self.peak * self.elapsed as f32 / self.attack_samples as f32;

                if self.elapsed >= self.attack_samples {
                    self.level = self.peak;
                    self.elapsed = 0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level *= self.decay_ratio;
                self.elapsed += 1;

                if self.elapsed >= self.decay_samples {
                    self.level = self.floor;
                    self.elapsed = 0;
                    self.stage = EnvelopeState::Tail;
                }
            }

            EnvelopeState::Tail => {
                self.level = self.floor;
                self.elapsed += 1;

                if self.elapsed >= self.tail_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            self.next_sample();
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.elapsed = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
