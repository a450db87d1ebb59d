use crate::dsp::OscillatorWaveform;

pub const MAIN_ACCENT_FREQ: f32 = 1_100.0;
pub const MAIN_FREQ: f32 = 750.0;
pub const POLY_ACCENT_FREQ: f32 = 900.0;
pub const POLY_FREQ: f32 = 620.0;

const ACCENT_PEAK: f32 = 0.9;
const REGULAR_PEAK: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStream {
    Main,
    Poly,
}

/// One click, scheduled against the output clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Absolute output-clock time in seconds
    pub time: f64,
    pub accented: bool,
    /// 0.0-1.0, scales the envelope peak
    pub intensity: f32,
    pub frequency: f32,
    pub stream: ClickStream,
}

impl ClickEvent {
    pub fn main(time: f64, accented: bool) -> Self {
        Self {
            time,
            accented,
            intensity: 1.0,
            frequency: if accented { MAIN_ACCENT_FREQ } else { MAIN_FREQ },
            stream: ClickStream::Main,
        }
    }

    pub fn poly(time: f64, accented: bool, intensity: f32) -> Self {
        Self {
            time,
            accented,
            intensity: intensity.clamp(0.0, 1.0),
            frequency: if accented { POLY_ACCENT_FREQ } else { POLY_FREQ },
            stream: ClickStream::Poly,
        }
    }

    /// Envelope peak: 0.9 accented, 0.7 otherwise, times intensity
    pub fn peak(&self) -> f32 {
        let base = if self.accented { ACCENT_PEAK } else { REGULAR_PEAK };
        base * self.intensity.clamp(0.0, 1.0)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        if self.accented {
            OscillatorWaveform::Square
        } else {
            OscillatorWaveform::Triangle
        }
    }

    /// Output frame the click starts on
    pub fn start_frame(&self, sample_rate: f32) -> u64 {
        (self.time.max(0.0) * sample_rate as f64).round() as u64
    }
}

/// State changes published to observers (UI, visualizers)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetronomeEvent {
    BpmChanged(u16),
    /// A beat start was dispatched
    Beat(usize),
    /// Measure progress in percent (0-100)
    PhaseChanged(f32),
    RunningChanged(bool),
}
