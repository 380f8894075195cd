//! Audio output — PCM quantization and WAV container wrapping.

pub mod pcm;
pub mod wav;

pub use pcm::{quantize, to_le_bytes};
pub use wav::{encode_wav, write_wav};
