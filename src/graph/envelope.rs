use crate::{
    dsp::envelope::Envelope,
    graph::node::{GraphNode, RenderCtx},
};

pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    /// Attack 3 ms, exponential decay 60 ms, 20 ms tail
    pub fn click() -> Self {
        Self {
            env: Envelope::click(),
        }
    }

    pub fn reset(&mut self) {
        self.env.reset();
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.env.render(out);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
