//! Interpreter — walks the token stream and renders notes into a [`Timeline`].
//!
//! All mutable performance settings live in [`PerformanceState`]. The token slice
//! is never modified; loops are a stack of frames plus a rewindable program counter.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::effect::{Effect, EffectChain, FilterType};
use crate::synth::{AdsrEnvelope, Unison, Voice, Waveform};

use super::length::LengthSpec;
use super::pitch::Pitch;
use super::timeline::Timeline;
use super::token::{Token, TokenKind};

/// A rendered value below this magnitude, within one period of a note's end,
/// silences the rest of the note.
pub const GATE_THRESHOLD: f64 = 0.05;

const DEFAULT_TEMPO: f64 = 120.0;
const DEFAULT_VOLUME: f64 = 0.5;

/// Everything the directives can change.
#[derive(Debug, Clone)]
pub struct PerformanceState {
    /// Beats per minute.
    pub tempo: f64,
    /// Octave offset from the reference octave.
    pub octave: i32,
    pub volume: f64,
    pub default_length: LengthSpec,
    pub waveform: Waveform,
    /// Partial weights for [`Waveform::Harmonics`], already divided by 100.
    pub harmony: Vec<f64>,
    pub unison: Unison,
    pub envelope: AdsrEnvelope,
    /// Next write position in samples.
    pub cursor: usize,
    pub effects: EffectChain,
}

impl PerformanceState {
    /// `;` — rewind to the start and restore the per-voice settings.
    ///
    /// Tempo, unison, harmony weights and the effect chain carry over into the
    /// new voice.
    pub fn reset_voice(&mut self) {
        self.cursor = 0;
        self.octave = 0;
        self.volume = DEFAULT_VOLUME;
        self.default_length = LengthSpec::default();
        self.waveform = Waveform::default();
        self.envelope = AdsrEnvelope::default();
    }
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            octave: 0,
            volume: DEFAULT_VOLUME,
            default_length: LengthSpec::default(),
            waveform: Waveform::default(),
            harmony: Vec::new(),
            unison: Unison::default(),
            envelope: AdsrEnvelope::default(),
            cursor: 0,
            effects: EffectChain::new(),
        }
    }
}

/// An open `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoopFrame {
    /// Index of the `[` token.
    start: usize,
    /// Passes still to play; `None` until the matching `]` is first reached.
    remaining: Option<u32>,
}

pub struct Interpreter<'a> {
    tokens: &'a [Token],
    sample_rate: u32,
    state: PerformanceState,
    loops: Vec<LoopFrame>,
    timeline: Timeline,
    rng: ChaCha8Rng,
    max_samples: Option<usize>,
}

impl<'a> Interpreter<'a> {
    /// `rng` feeds the white-noise oscillator.
    pub fn new(tokens: &'a [Token], sample_rate: u32, rng: ChaCha8Rng) -> Self {
        Self {
            tokens,
            sample_rate,
            state: PerformanceState::default(),
            loops: Vec::new(),
            timeline: Timeline::new(),
            rng,
            max_samples: None,
        }
    }

    /// Stop interpreting once the timeline or cursor reaches `max` samples.
    /// Notes and rests that cross the cap are cut short at it.
    pub fn with_max_samples(mut self, max: Option<usize>) -> Self {
        self.max_samples = max;
        self
    }

    pub fn state(&self) -> &PerformanceState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Interpret every token and return the finished timeline.
    pub fn run(mut self) -> Timeline {
        let mut pc = 0;
        while pc < self.tokens.len() {
            if self.limit_reached() {
                debug!(
                    token = pc,
                    samples = self.timeline.len(),
                    "sample limit reached, stopping"
                );
                break;
            }
            pc = self.step(pc);
        }
        self.timeline
    }

    fn limit_reached(&self) -> bool {
        self.max_samples
            .is_some_and(|max| self.timeline.len() >= max || self.state.cursor >= max)
    }

    /// Execute the token at `pc` and return the index of the next token to run.
    pub fn step(&mut self, pc: usize) -> usize {
        let tokens = self.tokens;
        match &tokens[pc].kind {
            TokenKind::Note { pitch, length } => self.render_note(*pitch, length.as_ref()),
            TokenKind::Rest(length) => self.render_rest(length.as_ref()),
            TokenKind::OctaveUp => self.state.octave = self.state.octave.saturating_add(1),
            TokenKind::OctaveDown => self.state.octave = self.state.octave.saturating_sub(1),
            TokenKind::Tempo(tempo) => {
                if *tempo > 0.0 {
                    self.state.tempo = *tempo;
                } else {
                    debug!(tempo, "ignoring non-positive tempo");
                }
            }
            TokenKind::Volume(volume) => self.state.volume = volume / 100.0,
            TokenKind::DefaultLength(length) => self.state.default_length = length.clone(),
            TokenKind::WaveformSelect(index) => self.state.waveform = Waveform::from_index(*index),
            TokenKind::Envelope(params) => match params.as_slice() {
                [attack, decay, sustain, release, ..] => {
                    self.state.envelope =
                        AdsrEnvelope::from_percent(*attack, *decay, *sustain, *release);
                }
                _ => debug!(params = params.len(), "ignoring @e with fewer than 4 params"),
            },
            TokenKind::Harmony(weights) => {
                if weights.is_empty() {
                    debug!("ignoring @h without weights");
                } else {
                    self.state.waveform = Waveform::Harmonics;
                    self.state.harmony = weights.iter().map(|w| w / 100.0).collect();
                }
            }
            TokenKind::Unison(params) => match params.as_slice() {
                [voices, detune, ..] => {
                    self.state.unison = Unison::new(*voices as u32, *detune);
                }
                _ => debug!(params = params.len(), "ignoring @u with fewer than 2 params"),
            },
            TokenKind::Effect { kind, params } => self.add_effect(*kind, params),
            TokenKind::RepeatStart => self.loops.push(LoopFrame {
                start: pc,
                remaining: None,
            }),
            TokenKind::RepeatEnd(count) => {
                if let Some(next) = self.repeat_end(*count) {
                    return next;
                }
            }
            TokenKind::VoiceReset => self.state.reset_voice(),
        }
        pc + 1
    }

    /// Close the innermost loop. Returns the token to jump back to, if another
    /// pass is due.
    fn repeat_end(&mut self, count: Option<u32>) -> Option<usize> {
        let Some(mut frame) = self.loops.pop() else {
            debug!("ignoring ] without matching [");
            return None;
        };

        let remaining = frame
            .remaining
            .unwrap_or_else(|| count.filter(|&c| c > 0).unwrap_or(1))
            - 1;
        if remaining == 0 {
            return None;
        }

        trace!(start = frame.start, remaining, "repeating loop");
        frame.remaining = Some(remaining);
        self.loops.push(frame);
        Some(frame.start + 1)
    }

    fn add_effect(&mut self, kind: char, params: &[f64]) {
        let rate = self.sample_rate;
        let effect = match (kind, params) {
            ('l', [cutoff, resonance, ..]) => {
                Effect::filter(FilterType::LowPass, *cutoff, *resonance, rate)
            }
            ('h', [cutoff, resonance, ..]) => {
                Effect::filter(FilterType::HighPass, *cutoff, *resonance, rate)
            }
            ('e', [feedback, delay, ..]) => Effect::echo(*feedback, *delay, rate),
            _ => {
                debug!(%kind, params = params.len(), "ignoring unknown or short effect");
                return;
            }
        };
        self.state.effects.push(effect);
    }

    /// Samples that may still be written from `cursor` before the cap.
    fn budget(&self, cursor: usize) -> usize {
        self.max_samples
            .map_or(usize::MAX, |max| max.saturating_sub(cursor))
    }

    fn note_samples(&self, length: Option<&LengthSpec>) -> usize {
        length
            .unwrap_or(&self.state.default_length)
            .samples(self.state.tempo, self.sample_rate)
    }

    fn render_note(&mut self, pitch: Pitch, length: Option<&LengthSpec>) {
        let note_len = self.note_samples(length);
        let rate = self.sample_rate as f64;
        let freq = pitch.frequency(self.state.octave);
        let period = rate / freq;

        let budget = self.budget(self.state.cursor);
        let state = &mut self.state;
        let envelope = state.envelope.for_note(note_len, self.sample_rate);
        let total = envelope.total_len();
        let voice = Voice {
            waveform: state.waveform,
            harmony: &state.harmony,
            unison: state.unison,
        };
        let effects = &mut state.effects;
        let cursor = state.cursor;

        let mut gated = false;
        for i in 0..total.min(budget) {
            let value = if gated {
                effects.apply(0.0) * state.volume
            } else {
                let t = i as f64 / rate;
                let dry = voice.sample(freq, t, &mut self.rng) * state.volume * envelope.amplitude(i);
                let wet = effects.apply(dry);
                if ((total - i) as f64) < period && wet.abs() < GATE_THRESHOLD {
                    gated = true;
                }
                wet
            };
            self.timeline.overlay(cursor + i, value);
        }

        state.cursor = state.cursor.saturating_add(note_len);
    }

    fn render_rest(&mut self, length: Option<&LengthSpec>) {
        let len = self.note_samples(length);
        let cursor = self.state.cursor;
        for i in 0..len.min(self.budget(cursor)) {
            let value = self.state.effects.apply(0.0) * self.state.volume;
            self.timeline.overlay(cursor + i, value);
        }
        self.state.cursor = cursor.saturating_add(len);
    }
}
