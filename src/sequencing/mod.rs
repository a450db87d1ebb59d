pub mod subdivision;
pub mod time_signature;
pub mod timing;

pub use subdivision::Subdivision;
pub use time_signature::TimeSignature;
pub use timing::{beat_duration, tempo_ms, TimingSnapshot, MAX_BPM, MAX_SWING, MIN_BPM};
