// Purpose - audio output devices the metronome schedules clicks against

pub mod cpal_output;
pub mod offline;

pub use cpal_output::CpalOutput;
pub use offline::OfflineOutput;

use crate::{engine::ClickEvent, error::DeviceError};

/// Ring capacity between the scheduler and the audio thread
pub const MESSAGE_QUEUE_SIZE: usize = 1024;

/// An output clock plus a place to put clicks on it
///
/// `now` and `schedule` share one clock: a click scheduled for time `t`
/// sounds when `now` reaches `t`, on the exact frame.
pub trait OutputDevice {
    /// Create the output graph if needed and make sure it is running.
    fn resume(&mut self) -> Result<(), DeviceError>;

    /// Current output-clock time in seconds
    fn now(&self) -> f64;

    /// Fire-and-forget; never blocks.
    fn schedule(&mut self, click: &ClickEvent);

    /// Master volume, 0.0-1.0. Takes effect without retriggering clicks.
    fn set_master_level(&mut self, level: f32);

    /// Silence and release the output.
    fn close(&mut self);
}
