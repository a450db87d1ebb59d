// Purpose: Click voices and the audio-thread renderer
// This layer sits above graph nodes and turns scheduled clicks into samples

pub mod click;
pub mod message;
pub mod voice;

pub use click::ClickSynth;
pub use message::ClickMessage;
