//! Synthesis primitives — oscillators, envelopes, and the unison voice mixer.

pub mod envelope;
pub mod oscillator;
pub mod voice;

pub use envelope::{AdsrEnvelope, NoteEnvelope};
pub use oscillator::Waveform;
pub use voice::{Unison, Voice};
