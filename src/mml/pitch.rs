//! Pitch names — converts `c`, `e-`, `f+` to equal-tempered frequencies.

use crate::synth::oscillator::midi_to_freq;

/// MIDI note of the reference `c` at octave offset 0 (C5, 523.25 Hz).
const REFERENCE_MIDI: i32 = 72;

/// Sharp, flat, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Accidental {
    /// Parse `+` (sharp) or `-` (flat).
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Accidental::Sharp),
            '-' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn semitones(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }
}

/// A pitch letter `a`–`g` with its accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    letter: char,
    accidental: Accidental,
}

impl Pitch {
    /// Returns `None` unless `letter` is one of `a`–`g`.
    pub fn new(letter: char, accidental: Accidental) -> Option<Self> {
        matches!(letter, 'a'..='g').then_some(Self { letter, accidental })
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Semitone distance from the reference `c`.
    ///
    /// Ranges over -1 (`c-`) to 12 (`b+`), so the 21 spellings cover the
    /// 14 distinct positions between the b below and the c above.
    pub fn semitone(&self) -> i32 {
        let base = match self.letter {
            'c' => 0,
            'd' => 2,
            'e' => 4,
            'f' => 5,
            'g' => 7,
            'a' => 9,
            'b' => 11,
            _ => unreachable!("Pitch::new only accepts a-g"),
        };
        base + self.accidental.semitones()
    }

    /// Frequency in Hz, transposed by `2^octave`.
    pub fn frequency(&self, octave: i32) -> f64 {
        let midi = REFERENCE_MIDI + self.semitone();
        midi_to_freq(midi as f64) * 2.0f64.powi(octave)
    }
}
