use crate::{
    dsp::{gain::MasterGain, OscillatorWaveform},
    synth::{
        message::{ClickMessage, MessageReceiver},
        voice::ClickVoice,
    },
    MAX_BLOCK_SIZE,
};

pub const MAX_VOICES: usize = 16;
/// Clicks waiting for their start frame; extra triggers are dropped
pub const MAX_PENDING: usize = 256;

#[derive(Debug, Clone, Copy)]
struct PendingClick {
    start_frame: u64,
    frequency: f32,
    peak: f32,
    waveform: OscillatorWaveform,
}

/// Audio-thread click renderer
///
/// Triggers carry absolute frame positions. A click due inside the current
/// block starts on its exact sample; a late click starts at the top of the
/// block. Nothing here allocates after construction.
pub struct ClickSynth<R: MessageReceiver> {
    voices: Vec<ClickVoice>,
    rx: R,
    pending: Vec<PendingClick>,
    gain: MasterGain,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<R: MessageReceiver> ClickSynth<R> {
    pub fn new(sample_rate: f32, rx: R, master_level: f32) -> Self {
        let voices = (0..MAX_VOICES).map(|_| ClickVoice::new(sample_rate)).collect();

        Self {
            voices,
            rx,
            pending: Vec::with_capacity(MAX_PENDING),
            gain: MasterGain::new(sample_rate, master_level),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    /// Output frames rendered so far; this is the output clock
    pub fn frames_rendered(&self) -> u64 {
        self.frame_counter
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn pending_clicks(&self) -> usize {
        self.pending.len()
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        while let Some(msg) = self.rx.pop() {
            match msg {
                ClickMessage::Trigger {
                    start_frame,
                    frequency,
                    peak,
                    waveform,
                } => {
                    if self.pending.len() < MAX_PENDING {
                        self.pending.push(PendingClick {
                            start_frame,
                            frequency,
                            peak,
                            waveform,
                        });
                    }
                }
                ClickMessage::SetMasterLevel(level) => self.gain.set_level(level),
                ClickMessage::Silence => {
                    self.pending.clear();
                    for voice in &mut self.voices {
                        voice.free();
                    }
                }
            }
        }

        let len = out.len();
        let block_start = self.frame_counter;
        let block_end = block_start + len as u64;

        // Voices already sounding cover the whole block
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let tbuf = &mut self.temp_buffer[..len];
                tbuf.fill(0.0);
                voice.render(tbuf);

                for (o, v) in out.iter_mut().zip(tbuf.iter()) {
                    *o += v;
                }
            }
        }

        // Clicks due in this block start on their own frame
        self.pending.sort_unstable_by_key(|p| p.start_frame);
        let due = self.pending.partition_point(|p| p.start_frame < block_end);
        for i in 0..due {
            let click = self.pending[i];
            let offset = click.start_frame.saturating_sub(block_start) as usize;
            let idx = self.allocate_voice();

            let voice = &mut self.voices[idx];
            voice.start(click.frequency, click.peak, click.waveform, click.start_frame);

            let tbuf = &mut self.temp_buffer[..len - offset];
            tbuf.fill(0.0);
            voice.render(tbuf);

            for (o, v) in out[offset..].iter_mut().zip(tbuf.iter()) {
                *o += v;
            }
        }
        self.pending.drain(..due);

        self.gain.process(out);
        self.frame_counter = block_end;
    }

    // Free voice first, otherwise steal the oldest
    fn allocate_voice(&self) -> usize {
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return idx;
        }

        self.voices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ClickEvent;
    use rtrb::RingBuffer;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn synth() -> (ClickSynth<rtrb::Consumer<ClickMessage>>, rtrb::Producer<ClickMessage>) {
        let (tx, rx) = RingBuffer::new(512);
        (ClickSynth::new(SAMPLE_RATE, rx, 1.0), tx)
    }

    fn first_sound(buffer: &[f32]) -> Option<usize> {
        buffer.iter().position(|s| s.abs() > 1e-9)
    }

    #[test]
    fn click_starts_on_its_frame() {
        let (mut synth, mut tx) = synth();
        // 0.01 s = frame 480, inside the first 512-frame block
        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(0.01, true), SAMPLE_RATE));

        let mut block = vec![0.0f32; 512];
        synth.render_block(&mut block);

        // the attack's first sample is already above zero
        assert_eq!(first_sound(&block), Some(480));
        assert_eq!(synth.active_voices(), 1);
    }

    #[test]
    fn future_click_waits_for_its_block() {
        let (mut synth, mut tx) = synth();
        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(0.02, false), SAMPLE_RATE));

        let mut block = vec![0.0f32; 512];
        synth.render_block(&mut block);
        assert_eq!(first_sound(&block), None);
        assert_eq!(synth.pending_clicks(), 1);

        synth.render_block(&mut block);
        // frame 960 is offset 448 of the second block
        assert_eq!(first_sound(&block), Some(448));
        assert_eq!(synth.pending_clicks(), 0);
    }

    #[test]
    fn late_click_plays_at_block_start() {
        let (mut synth, mut tx) = synth();
        let mut block = vec![0.0f32; 512];
        synth.render_block(&mut block);

        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(0.0, true), SAMPLE_RATE));
        synth.render_block(&mut block);
        assert_eq!(first_sound(&block), Some(0));
    }

    #[test]
    fn output_stays_under_master_ceiling() {
        let (mut synth, mut tx) = synth();
        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(0.0, true), SAMPLE_RATE));

        let mut block = vec![0.0f32; 1024];
        synth.render_block(&mut block);
        let peak = block.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        // 0.9 peak × 0.4 ceiling
        assert!(peak > 0.3 && peak <= 0.36 + 1e-6, "peak {peak}");
    }

    #[test]
    fn voices_are_freed_and_stolen() {
        let (mut synth, mut tx) = synth();
        for i in 0..(MAX_VOICES + 4) {
            let click = ClickEvent::main(i as f64 / SAMPLE_RATE as f64, false);
            let _ = tx.push(ClickMessage::trigger(&click, SAMPLE_RATE));
        }

        let mut block = vec![0.0f32; 64];
        synth.render_block(&mut block);
        assert_eq!(synth.active_voices(), MAX_VOICES);

        let mut long = vec![0.0f32; 2048];
        for _ in 0..3 {
            synth.render_block(&mut long);
        }
        assert_eq!(synth.active_voices(), 0);
    }

    #[test]
    fn silence_drops_pending_and_active() {
        let (mut synth, mut tx) = synth();
        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(0.0, true), SAMPLE_RATE));
        let _ = tx.push(ClickMessage::trigger(&ClickEvent::main(1.0, true), SAMPLE_RATE));

        let mut block = vec![0.0f32; 256];
        synth.render_block(&mut block);
        assert_eq!(synth.active_voices(), 1);

        let _ = tx.push(ClickMessage::Silence);
        synth.render_block(&mut block);
        assert_eq!(synth.active_voices(), 0);
        assert_eq!(synth.pending_clicks(), 0);
        assert_eq!(first_sound(&block), None);
    }
}
