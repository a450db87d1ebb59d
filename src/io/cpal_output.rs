use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use rtrb::{Producer, RingBuffer};
use tracing::{error, info, warn};

use super::{OutputDevice, MESSAGE_QUEUE_SIZE};
use crate::{
    engine::ClickEvent,
    error::DeviceError,
    synth::{ClickMessage, ClickSynth},
    MAX_BLOCK_SIZE,
};

struct ActiveStream {
    stream: cpal::Stream,
    tx: Producer<ClickMessage>,
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

/// Default system output through cpal
///
/// The stream is built on the first `resume`. The audio callback owns a
/// [`ClickSynth`] and publishes how many frames it has rendered; that count
/// is the output clock.
pub struct CpalOutput {
    active: Option<ActiveStream>,
    master_level: f32,
}

impl CpalOutput {
    pub fn new(master_level: f32) -> Self {
        Self {
            active: None,
            master_level,
        }
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.active.as_ref().map(|a| a.sample_rate)
    }

    fn open(&self) -> Result<ActiveStream, DeviceError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(DeviceError::NoDevices)?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| DeviceError::Config(e.to_string()))?;

        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate,
            channels,
            "Opening audio output"
        );

        let (tx, rx) = RingBuffer::<ClickMessage>::new(MESSAGE_QUEUE_SIZE);
        let mut synth = ClickSynth::new(sample_rate, rx, self.master_level);

        let frames = Arc::new(AtomicU64::new(0));
        let frames_clone = frames.clone();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let config: StreamConfig = supported_config.into();
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        synth.render_block(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }

                    frames_clone.store(synth.frames_rendered(), Ordering::Release);
                },
                move |err| error!("Output stream error: {}", err),
                None,
            )
            .map_err(|e| DeviceError::Stream(e.to_string()))?;

        Ok(ActiveStream {
            stream,
            tx,
            frames,
            sample_rate,
        })
    }
}

impl Default for CpalOutput {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl OutputDevice for CpalOutput {
    fn resume(&mut self) -> Result<(), DeviceError> {
        if self.active.is_none() {
            self.active = Some(self.open()?);
        }

        if let Some(active) = &self.active {
            active
                .stream
                .play()
                .map_err(|e| DeviceError::Resume(e.to_string()))?;
        }
        Ok(())
    }

    fn now(&self) -> f64 {
        match &self.active {
            Some(active) => {
                active.frames.load(Ordering::Acquire) as f64 / active.sample_rate as f64
            }
            None => 0.0,
        }
    }

    fn schedule(&mut self, click: &ClickEvent) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let msg = ClickMessage::trigger(click, active.sample_rate);
        if active.tx.push(msg).is_err() {
            warn!(time = click.time, "Click queue full, dropping click");
        }
    }

    fn set_master_level(&mut self, level: f32) {
        self.master_level = level;
        if let Some(active) = self.active.as_mut() {
            let _ = active.tx.push(ClickMessage::SetMasterLevel(level));
        }
    }

    fn close(&mut self) {
        if let Some(mut active) = self.active.take() {
            let _ = active.tx.push(ClickMessage::Silence);
            if let Err(err) = active.stream.pause() {
                warn!(%err, "Failed to pause output stream");
            }
            info!("Audio output closed");
        }
    }
}
