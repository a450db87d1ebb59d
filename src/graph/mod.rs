//! Composable building blocks for click voices.
//!
//! Graph nodes wrap the low-level DSP primitives with what a voice needs:
//! trigger events and block-based rendering. The `extensions` module adds the
//! fluent `.amplify()` helper so a voice reads as `tone.amplify(envelope)`.

/// Multiply two signals together (tone × envelope).
pub mod amplify;
/// Click envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Core traits shared by all graph nodes.
pub mod node;
/// Tone generator node.
pub mod oscillator;
