/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Click pitch (Hz)
/// - velocity: Peak level of the click (0.0-1.0)
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub velocity: f32,
}

impl RenderCtx {
    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
        }
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render audio in blocks and respond to click triggers.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when a click starts
    fn note_on(&mut self, _ctx: &RenderCtx) {}

    /// Check if this node is still producing sound
    ///
    /// Used by the voice pool to know when a voice can be reused.
    fn is_active(&self) -> bool {
        true
    }
}
