use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/// Tone source for a click
///
/// Pitch comes from `RenderCtx::frequency`. The waveform can change between
/// clicks (square for accents, triangle otherwise) and every trigger restarts
/// the cycle, so identical clicks render identically.
pub struct OscNode {
    osc: OscillatorBlock,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self { osc }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    pub fn set_waveform(&mut self, waveform: OscillatorWaveform) {
        self.osc.set_waveform(waveform);
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
