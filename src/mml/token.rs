//! Token types for the MML lexer.

use super::length::LengthSpec;
use super::pitch::Pitch;

/// A token produced by the lexer.
///
/// `offset` is the character index of the token's first character in the source,
/// used by tooling to point back at the notation.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Sound
    Note {
        pitch: Pitch,
        length: Option<LengthSpec>,
    },
    Rest(Option<LengthSpec>),

    // State
    OctaveUp,
    OctaveDown,
    Tempo(f64),
    Volume(f64),
    DefaultLength(LengthSpec),
    WaveformSelect(u32),

    // Parameterised directives; arity is checked by the interpreter.
    Envelope(Vec<f64>),
    Harmony(Vec<f64>),
    Unison(Vec<f64>),
    Effect { kind: char, params: Vec<f64> },

    // Control flow
    RepeatStart,
    RepeatEnd(Option<u32>),
    VoiceReset,
}

impl TokenKind {
    /// Short human-readable label, used by the `tokens` subcommand.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Note { .. } => "note",
            TokenKind::Rest(_) => "rest",
            TokenKind::OctaveUp => "octave-up",
            TokenKind::OctaveDown => "octave-down",
            TokenKind::Tempo(_) => "tempo",
            TokenKind::Volume(_) => "volume",
            TokenKind::DefaultLength(_) => "default-length",
            TokenKind::WaveformSelect(_) => "waveform",
            TokenKind::Envelope(_) => "envelope",
            TokenKind::Harmony(_) => "harmony",
            TokenKind::Unison(_) => "unison",
            TokenKind::Effect { .. } => "effect",
            TokenKind::RepeatStart => "repeat-start",
            TokenKind::RepeatEnd(_) => "repeat-end",
            TokenKind::VoiceReset => "voice-reset",
        }
    }
}
