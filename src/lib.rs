pub mod config; // User settings, patches and snapshots
pub mod dsp;
pub mod engine; // Transport, look-ahead scheduler, metronome facade
pub mod error;
pub mod graph; // Composable click voice nodes
pub mod io;
pub mod sequencing; // Musical timing
pub mod synth; // Voice pool and audio-thread renderer

pub use config::{ConfigPatch, ConfigSnapshot, MetronomeConfig};
pub use engine::{ClickEvent, Metronome, MetronomeEvent};
pub use error::{DeviceError, ImportError};
pub use io::{CpalOutput, OfflineOutput, OutputDevice};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
