use rtrb::{Consumer, Producer, RingBuffer};
use tracing::warn;

use super::OutputDevice;
use crate::{
    engine::ClickEvent,
    error::DeviceError,
    synth::{ClickMessage, ClickSynth},
    MAX_BLOCK_SIZE,
};

const OFFLINE_QUEUE_SIZE: usize = 4096;

/// Manually clocked output for tests, benches and bounces
///
/// Time only moves when frames are rendered. Every scheduled click is also
/// recorded, so callers can inspect the exact timeline.
pub struct OfflineOutput {
    sample_rate: f32,
    synth: ClickSynth<Consumer<ClickMessage>>,
    tx: Producer<ClickMessage>,
    scheduled: Vec<ClickEvent>,
    master_level: f32,
    available: bool,
    resumed: bool,
}

impl OfflineOutput {
    pub fn new(sample_rate: f32) -> Self {
        let (tx, rx) = RingBuffer::new(OFFLINE_QUEUE_SIZE);
        Self {
            sample_rate,
            synth: ClickSynth::new(sample_rate, rx, 1.0),
            tx,
            scheduled: Vec::new(),
            master_level: 1.0,
            available: true,
            resumed: false,
        }
    }

    /// A device whose `resume` always fails
    pub fn unavailable(sample_rate: f32) -> Self {
        Self {
            available: false,
            ..Self::new(sample_rate)
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    pub fn master_level(&self) -> f32 {
        self.master_level
    }

    /// Every click scheduled so far, in dispatch order
    pub fn scheduled(&self) -> &[ClickEvent] {
        &self.scheduled
    }

    /// Render `frames` of mono output, moving the clock forward
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; frames];
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.synth.render_block(chunk);
        }
        out
    }

    /// Move the clock forward by `seconds`, discarding the audio
    pub fn advance(&mut self, seconds: f64) {
        let frames = (seconds * self.sample_rate as f64).round().max(0.0) as usize;
        let mut block = [0.0f32; MAX_BLOCK_SIZE];
        let mut remaining = frames;
        while remaining > 0 {
            let n = remaining.min(MAX_BLOCK_SIZE);
            self.synth.render_block(&mut block[..n]);
            remaining -= n;
        }
    }
}

impl OutputDevice for OfflineOutput {
    fn resume(&mut self) -> Result<(), DeviceError> {
        if !self.available {
            return Err(DeviceError::Unavailable("offline output disabled".into()));
        }
        self.resumed = true;
        Ok(())
    }

    fn now(&self) -> f64 {
        self.synth.frames_rendered() as f64 / self.sample_rate as f64
    }

    fn schedule(&mut self, click: &ClickEvent) {
        self.scheduled.push(*click);
        if self
            .tx
            .push(ClickMessage::trigger(click, self.sample_rate))
            .is_err()
        {
            warn!(time = click.time, "Offline click queue full, dropping click");
        }
    }

    fn set_master_level(&mut self, level: f32) {
        self.master_level = level;
        let _ = self.tx.push(ClickMessage::SetMasterLevel(level));
    }

    fn close(&mut self) {
        let _ = self.tx.push(ClickMessage::Silence);
        self.resumed = false;
    }
}
