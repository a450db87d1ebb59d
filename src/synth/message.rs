use rtrb::Consumer;

use crate::{dsp::OscillatorWaveform, engine::ClickEvent};

/// Control messages from the scheduler side to the audio thread
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClickMessage {
    Trigger {
        /// Absolute output frame the click starts on
        start_frame: u64,
        frequency: f32,
        peak: f32,
        waveform: OscillatorWaveform,
    },
    /// Master volume, 0.0-1.0
    SetMasterLevel(f32),
    /// Drop pending clicks and silence every voice
    Silence,
}

impl ClickMessage {
    pub fn trigger(click: &ClickEvent, sample_rate: f32) -> Self {
        Self::Trigger {
            start_frame: click.start_frame(sample_rate),
            frequency: click.frequency,
            peak: click.peak(),
            waveform: click.waveform(),
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ClickMessage>;
}

impl MessageReceiver for Consumer<ClickMessage> {
    fn pop(&mut self) -> Option<ClickMessage> {
        Consumer::pop(self).ok()
    }
}
