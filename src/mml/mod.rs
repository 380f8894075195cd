//! MML renderer — source text → tokens → interpreter → timeline → PCM.

pub mod interpreter;
pub mod length;
pub mod lexer;
pub mod pitch;
pub mod timeline;
pub mod token;

pub use interpreter::{Interpreter, PerformanceState};
pub use length::{LengthPart, LengthSpec};
pub use lexer::tokenize;
pub use pitch::{Accidental, Pitch};
pub use timeline::Timeline;
pub use token::{Token, TokenKind};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::audio::pcm;

/// Renders MML source to audio.
///
/// Each call builds its own tokens, state, timeline and effect chain, so one
/// composer can be shared freely.
#[derive(Debug, Clone)]
pub struct Composer {
    sample_rate: u32,
    seed: Option<u64>,
    max_samples: Option<usize>,
}

impl Composer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            seed: None,
            max_samples: None,
        }
    }

    /// Seed the white-noise generator so renders are repeatable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cap the output length. Interpretation stops once the cap is reached and
    /// the result is truncated to it.
    pub fn with_max_samples(mut self, max: Option<usize>) -> Self {
        self.max_samples = max;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render to an unclamped floating-point timeline.
    pub fn render(&self, source: &str) -> Vec<f64> {
        if self.sample_rate == 0 {
            return Vec::new();
        }

        let tokens = tokenize(source);
        let rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut samples = Interpreter::new(&tokens, self.sample_rate, rng)
            .with_max_samples(self.max_samples)
            .run()
            .into_samples();
        if let Some(max) = self.max_samples {
            samples.truncate(max);
        }

        debug!(
            tokens = tokens.len(),
            samples = samples.len(),
            sample_rate = self.sample_rate,
            "rendered"
        );
        samples
    }

    /// Render to 16-bit PCM.
    pub fn compose(&self, source: &str) -> Vec<i16> {
        pcm::quantize(&self.render(source))
    }

    /// Render to headerless little-endian 16-bit PCM bytes.
    pub fn compose_bytes(&self, source: &str) -> Vec<u8> {
        pcm::to_le_bytes(&self.compose(source))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SAMPLE_RATE)
    }
}

/// Render `source` to mono 16-bit PCM at `sample_rate`.
pub fn compose(source: &str, sample_rate: u32) -> Vec<i16> {
    Composer::new(sample_rate).compose(source)
}
