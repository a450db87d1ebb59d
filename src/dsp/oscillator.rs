use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/*
Click Oscillators
=================

A metronome click is a very short burst of a plain periodic waveform. The
waveform decides how the click "reads" against music:

  Sine      Pure tone, no overtones. Soft; easy to lose in a mix.
  Square    Odd harmonics at 1/n. Hard and woody; used for accented clicks.
  Triangle  Odd harmonics at 1/n². Rounder than square, brighter than sine;
            used for regular clicks.

All three are generated from a single phase accumulator:

    phase += frequency / sample_rate      (wrapped to [0, 1))

    sine      sin(2π·phase)
    square    +1 for phase < 0.5, -1 otherwise
    triangle  1 - 4·|phase - 0.5|         (peaks at ±1)

The waveforms are naive (not band-limited). A click lasts under 100 ms and
sits at 600-1100 Hz, so aliasing stays far below the envelope's own
transient.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Square,
    Triangle,
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    pub fn set_waveform(&mut self, waveform: OscillatorWaveform) {
        self.waveform = waveform;
    }

    /// Restart the cycle so every click begins at the same point of the wave
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn sample_at(&self, phase: f32) -> f32 {
        match self.waveform {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }

    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in destination.iter_mut() {
            *sample = self.sample_at(self.phase);
            self.phase += increment;
            self.phase -= self.phase.floor();
        }
    }
}
