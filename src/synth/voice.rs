//! Voice mixer — one or more detuned unison copies of the current waveform.

use rand::Rng;

use super::oscillator::{oscillator, Waveform};

/// Unison stacking: `voices` copies spread across `detune` on either side of the
/// fundamental.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unison {
    pub voices: u32,
    /// Spread amount; the outermost voices sit at `(1 + detune/10000)^±1`.
    pub detune: f64,
}

impl Unison {
    /// Most voices a single note will stack.
    pub const MAX_VOICES: u32 = 64;

    /// Voice count is capped at [`Unison::MAX_VOICES`].
    pub fn new(voices: u32, detune: f64) -> Self {
        Self {
            voices: voices.min(Self::MAX_VOICES),
            detune,
        }
    }

    /// Frequency ratio of voice `index` out of `self.voices`.
    ///
    /// The exponent runs linearly from -1 for the first voice to +1 for the last.
    /// Fewer than two voices always play the fundamental.
    pub fn ratio(&self, index: u32) -> f64 {
        if self.voices < 2 {
            return 1.0;
        }
        let p = -1.0 + index as f64 * 2.0 / (self.voices - 1) as f64;
        (1.0 + self.detune / 10_000.0).powf(p)
    }

    fn voice_count(&self) -> u32 {
        self.voices.max(1)
    }
}

impl Default for Unison {
    fn default() -> Self {
        Self {
            voices: 1,
            detune: 0.0,
        }
    }
}

/// The timbre a note is rendered with.
#[derive(Debug, Clone, Copy)]
pub struct Voice<'a> {
    pub waveform: Waveform,
    pub harmony: &'a [f64],
    pub unison: Unison,
}

impl Voice<'_> {
    /// Unit-amplitude sample at `t` seconds after note-on: the average of all
    /// unison voices.
    pub fn sample<R: Rng + ?Sized>(&self, freq: f64, t: f64, rng: &mut R) -> f64 {
        let count = self.unison.voice_count();
        let sum: f64 = (0..count)
            .map(|j| {
                let f = freq * self.unison.ratio(j);
                oscillator(self.waveform, f, t, self.harmony, rng)
            })
            .sum();
        sum / count as f64
    }
}
