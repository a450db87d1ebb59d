use crate::{
    dsp::OscillatorWaveform,
    graph::{
        amplify::Amplify,
        envelope::EnvNode,
        extensions::NodeExt,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,   // Available for allocation
    Active, // Envelope running
}

/// One click voice: tone × envelope
pub struct ClickVoice {
    state: VoiceState,
    age: u64,
    ctx: RenderCtx,
    graph: Amplify<OscNode, EnvNode>,
}

impl ClickVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: VoiceState::Free,
            age: 0,
            ctx: RenderCtx::from_freq(sample_rate, 0.0, 0.0),
            graph: OscNode::triangle().amplify(EnvNode::click()),
        }
    }

    pub fn start(&mut self, frequency: f32, peak: f32, waveform: OscillatorWaveform, age: u64) {
        self.state = VoiceState::Active;
        self.age = age;
        self.ctx = RenderCtx::from_freq(self.ctx.sample_rate, frequency, peak);

        self.graph.signal.set_waveform(waveform);
        self.graph.note_on(&self.ctx);
    }

    /// Render into `out`; the voice frees itself once the envelope ends
    pub fn render(&mut self, out: &mut [f32]) {
        self.graph.render_block(out, &self.ctx);

        if !self.graph.is_active() {
            self.free();
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        self.state == VoiceState::Active
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.graph.modulator.reset();
    }

    pub fn age(&self) -> u64 {
        self.age
    }
}
