//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs.

/// One-shot click envelope (linear attack, exponential decay, short tail).
pub mod envelope;
/// Master volume stage with per-sample smoothing.
pub mod gain;
/// Sine, square and triangle waveforms.
pub mod oscillator;

pub use envelope::EnvelopeState;
pub use oscillator::OscillatorWaveform;
