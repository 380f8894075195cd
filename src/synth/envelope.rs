//! ADSR envelope generator.

/// Attack-Decay-Sustain-Release settings.
///
/// Attack, decay and release are in seconds. Sustain is a level (nominally 0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrEnvelope {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl AdsrEnvelope {
    /// Build from `@e` percentages: each value is divided by 100.
    pub fn from_percent(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack / 100.0,
            decay: decay / 100.0,
            sustain: sustain / 100.0,
            release: release / 100.0,
        }
    }

    /// Resolve the envelope against a note of `note_len` samples.
    ///
    /// Attack is capped to the note length and decay to whatever the attack leaves,
    /// so both always finish by the nominal note end. The release tail is not capped.
    pub fn for_note(&self, note_len: usize, sample_rate: u32) -> NoteEnvelope {
        let to_samples = |secs: f64| (secs * sample_rate as f64).floor() as usize;
        let attack_len = to_samples(self.attack).min(note_len);
        let decay_len = to_samples(self.decay).min(note_len - attack_len);
        NoteEnvelope {
            attack_len,
            decay_len,
            sustain: self.sustain,
            release_len: to_samples(self.release),
            note_len,
        }
    }
}

impl Default for AdsrEnvelope {
    /// No attack, no decay, full sustain, no release: a plain gate.
    fn default() -> Self {
        Self {
            attack: 0.0,
            decay: 0.0,
            sustain: 1.0,
            release: 0.0,
        }
    }
}

/// An [`AdsrEnvelope`] resolved to sample counts for one note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEnvelope {
    pub attack_len: usize,
    pub decay_len: usize,
    pub sustain: f64,
    pub release_len: usize,
    pub note_len: usize,
}

impl NoteEnvelope {
    /// Amplitude at sample `i` since note-on.
    ///
    /// - `[0, attack)`: linear ramp from 0 to 1.
    /// - `[attack, attack+decay)`: linear ramp from 1 to sustain.
    /// - `[attack+decay, note_len)`: sustain level.
    /// - `[note_len, note_len+release)`: linear ramp from sustain to 0.
    /// - After the release tail: 0.
    pub fn amplitude(&self, i: usize) -> f64 {
        let attack_end = self.attack_len + self.decay_len;
        if i < self.attack_len {
            i as f64 / self.attack_len as f64
        } else if i < attack_end {
            let decay_t = (i - self.attack_len) as f64 / self.decay_len as f64;
            1.0 - (1.0 - self.sustain) * decay_t
        } else if i < self.note_len {
            self.sustain
        } else if i < self.total_len() {
            let remaining = (self.total_len() - i) as f64;
            self.sustain * remaining / self.release_len as f64
        } else {
            0.0
        }
    }

    /// Note length plus release tail, in samples.
    pub fn total_len(&self) -> usize {
        self.note_len.saturating_add(self.release_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1000;

    fn test_env() -> AdsrEnvelope {
        AdsrEnvelope {
            attack: 0.01,
            decay: 0.05,
            sustain: 0.7,
            release: 0.1,
        }
    }

    #[test]
    fn resolves_to_samples() {
        let env = test_env().for_note(1000, RATE);
        assert_eq!(env.attack_len, 10);
        assert_eq!(env.decay_len, 50);
        assert_eq!(env.release_len, 100);
        assert_eq!(env.total_len(), 1100);
    }

    #[test]
    fn starts_at_zero() {
        let env = test_env().for_note(1000, RATE);
        assert!(env.amplitude(0).abs() < 1e-10);
    }

    #[test]
    fn reaches_peak_at_attack_end() {
        let env = test_env().for_note(1000, RATE);
        assert!((env.amplitude(10) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn decays_to_sustain() {
        let env = test_env().for_note(1000, RATE);
        assert!((env.amplitude(35) - 0.85).abs() < 1e-10);
        assert!((env.amplitude(60) - 0.7).abs() < 1e-10);
        assert!((env.amplitude(999) - 0.7).abs() < 1e-10);
    }

    #[test]
    fn release_ramps_to_zero() {
        let env = test_env().for_note(1000, RATE);
        assert!((env.amplitude(1000) - 0.7).abs() < 1e-10);
        assert!((env.amplitude(1050) - 0.35).abs() < 1e-10);
        assert!(env.amplitude(1099) < 0.01);
        assert_eq!(env.amplitude(1100), 0.0);
    }

    #[test]
    fn attack_capped_to_note() {
        let env = AdsrEnvelope {
            attack: 1.0,
            decay: 1.0,
            sustain: 0.5,
            release: 0.0,
        }
        .for_note(100, RATE);
        assert_eq!(env.attack_len, 100);
        assert_eq!(env.decay_len, 0);
    }

    #[test]
    fn decay_capped_to_remaining() {
        let env = AdsrEnvelope {
            attack: 0.06,
            decay: 1.0,
            sustain: 0.5,
            release: 0.0,
        }
        .for_note(100, RATE);
        assert_eq!(env.attack_len, 60);
        assert_eq!(env.decay_len, 40);
    }

    #[test]
    fn default_is_flat_gate() {
        let env = AdsrEnvelope::default().for_note(500, RATE);
        assert_eq!(env.amplitude(0), 1.0);
        assert_eq!(env.amplitude(499), 1.0);
        assert_eq!(env.total_len(), 500);
    }

    #[test]
    fn from_percent() {
        let env = AdsrEnvelope::from_percent(10.0, 20.0, 50.0, 30.0);
        assert!((env.attack - 0.1).abs() < 1e-12);
        assert!((env.decay - 0.2).abs() < 1e-12);
        assert!((env.sustain - 0.5).abs() < 1e-12);
        assert!((env.release - 0.3).abs() < 1e-12);
    }

    #[test]
    fn envelope_stays_in_unit_range() {
        let env = test_env().for_note(1000, RATE);
        for i in 0..1200 {
            let amp = env.amplitude(i);
            assert!((0.0..=1.0 + 1e-10).contains(&amp), "amplitude {amp} at {i}");
        }
    }
}
