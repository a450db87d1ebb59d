//! Metronome scenario benchmarks.
//!
//! These model the two hot paths of a running metronome: the audio callback
//! rendering overlapping clicks, and a scheduler pass on the UI tick.

mod clicks;
mod scheduler;

pub use clicks::bench_clicks;
pub use scheduler::bench_scheduler;
