//! Oscillator primitives — stateless waveform generation.
//!
//! Every oscillator is a pure function of frequency and time since note-on, so a
//! note always starts at phase zero.

use std::f64::consts::PI;

use rand::Rng;

/// Available waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Square50,
    Square25,
    Square12,
    Triangle,
    Saw,
    Sine,
    WhiteNoise,
    /// Additive sine partials weighted by the harmony list.
    Harmonics,
}

impl Waveform {
    /// Waveforms reachable through `@N`, in index order.
    pub const SELECTABLE: [Waveform; 7] = [
        Waveform::Square50,
        Waveform::Square25,
        Waveform::Square12,
        Waveform::Triangle,
        Waveform::Saw,
        Waveform::Sine,
        Waveform::WhiteNoise,
    ];

    /// Map a `@N` index to a waveform. Out-of-range indices fall back to `Square50`.
    pub fn from_index(index: u32) -> Self {
        Self::SELECTABLE
            .get(index as usize)
            .copied()
            .unwrap_or(Waveform::Square50)
    }
}

pub fn sine(freq: f64, t: f64) -> f64 {
    (2.0 * PI * freq * t).sin()
}

/// Pulse wave: `+1` while the cycle position is at or below `duty`, `-1` after.
pub fn square(freq: f64, t: f64, duty: f64) -> f64 {
    if (freq * t).rem_euclid(1.0) <= duty {
        1.0
    } else {
        -1.0
    }
}

/// Rising ramp over `[0, 1)`.
pub fn saw(freq: f64, t: f64) -> f64 {
    (freq * t).rem_euclid(1.0)
}

pub fn triangle(freq: f64, t: f64) -> f64 {
    (2.0 * PI * freq * t).cos().acos() * 2.0 / PI - 1.0
}

/// Uniform noise in `[-1, 1]`, independent on every call.
pub fn white_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-1.0..=1.0)
}

/// Sum of sine partials at integer multiples of `freq`, weighted and divided by
/// the number of partials. An empty weight list is silent.
pub fn harmonics(freq: f64, t: f64, weights: &[f64]) -> f64 {
    if weights.is_empty() {
        return 0.0;
    }
    let sum: f64 = weights
        .iter()
        .enumerate()
        .map(|(k, w)| sine(freq * (k + 1) as f64, t) * w)
        .sum();
    sum / weights.len() as f64
}

/// Generate a single sample for the given waveform.
///
/// `t` is seconds since note-on. `weights` is only read by [`Waveform::Harmonics`]
/// and `rng` only by [`Waveform::WhiteNoise`].
pub fn oscillator<R: Rng + ?Sized>(
    waveform: Waveform,
    freq: f64,
    t: f64,
    weights: &[f64],
    rng: &mut R,
) -> f64 {
    match waveform {
        Waveform::Square50 => square(freq, t, 0.5),
        Waveform::Square25 => square(freq, t, 0.25),
        Waveform::Square12 => square(freq, t, 0.125),
        Waveform::Triangle => triangle(freq, t),
        Waveform::Saw => saw(freq, t),
        Waveform::Sine => sine(freq, t),
        Waveform::WhiteNoise => white_noise(rng),
        Waveform::Harmonics => harmonics(freq, t, weights),
    }
}

/// Convert a (possibly fractional) MIDI note number to frequency in Hz.
///
/// Standard tuning: A4 (MIDI 69) = 440 Hz.
pub fn midi_to_freq(note: f64) -> f64 {
    440.0 * 2.0f64.powf((note - 69.0) / 12.0)
}
