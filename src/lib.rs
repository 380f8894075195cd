//! Dischord — renders a compact text music notation (MML) to PCM audio.
//!
//! ```
//! let pcm = dischord::compose("t120 l4 cdef", 44100);
//! assert_eq!(pcm.len(), 4 * 22050);
//! ```

pub mod audio;
pub mod config;
pub mod effect;
pub mod error;
pub mod mml;
pub mod synth;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use mml::{compose, tokenize, Composer};
