//! Lexer for MML source.
//!
//! Converts source text into a stream of [`Token`]s. The lexer never fails:
//! characters that cannot start a token are skipped, and a directive letter
//! without a usable argument produces nothing.

use super::length::{LengthPart, LengthSpec};
use super::pitch::{Accidental, Pitch};
use super::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let offset = self.pos;
            let kind = match self.peek() {
                'a'..='g' => self.lex_note(),
                'r' => {
                    self.advance();
                    Some(TokenKind::Rest(self.lex_length()))
                }
                '<' => self.single_char(TokenKind::OctaveUp),
                '>' => self.single_char(TokenKind::OctaveDown),
                '[' => self.single_char(TokenKind::RepeatStart),
                ';' => self.single_char(TokenKind::VoiceReset),
                ']' => {
                    self.advance();
                    let count = self.lex_digits().map(|d| parse_saturating(&d));
                    Some(TokenKind::RepeatEnd(count))
                }
                't' => {
                    self.advance();
                    self.lex_number().map(TokenKind::Tempo)
                }
                'v' => {
                    self.advance();
                    self.lex_number().map(TokenKind::Volume)
                }
                'l' => {
                    self.advance();
                    self.lex_length().map(TokenKind::DefaultLength)
                }
                '@' => self.lex_at_directive(),
                '#' => self.lex_effect(),
                _ => {
                    self.advance();
                    None
                }
            };

            if let Some(kind) = kind {
                tokens.push(Token { kind, offset });
            }
        }

        tokens
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_is(&self, ch: char) -> bool {
        self.chars.get(self.pos) == Some(&ch)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn single_char(&mut self, kind: TokenKind) -> Option<TokenKind> {
        self.advance();
        Some(kind)
    }

    fn lex_digits(&mut self) -> Option<String> {
        let mut s = String::new();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            s.push(self.advance());
        }
        (!s.is_empty()).then_some(s)
    }

    /// `digits ( '.' digits )?` — the fraction is only taken when a digit follows the dot.
    fn lex_number(&mut self) -> Option<f64> {
        let mut s = self.lex_digits()?;
        if self.peek_is('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            s.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                s.push(self.advance());
            }
        }
        s.parse().ok()
    }

    /// Comma-separated numbers. A comma is only consumed when a number follows it.
    fn lex_params(&mut self) -> Vec<f64> {
        let mut params = Vec::new();
        let Some(first) = self.lex_number() else {
            return params;
        };
        params.push(first);

        while self.peek_is(',') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume ','
            match self.lex_number() {
                Some(n) => params.push(n),
                None => break,
            }
        }
        params
    }

    /// `part ( '&' part )*` where `part = digits? '.'?`.
    ///
    /// Parts without digits are consumed but dropped, so `c.` and `c&` fall back
    /// to the default length.
    fn lex_length(&mut self) -> Option<LengthSpec> {
        let mut parts = Vec::new();
        loop {
            let digits = self.lex_digits();
            let dotted = if self.peek_is('.') {
                self.advance();
                true
            } else {
                false
            };
            if let Some(d) = digits {
                parts.push(LengthPart {
                    denominator: parse_saturating(&d),
                    dotted,
                });
            }

            if self.peek_is('&') {
                self.advance();
            } else {
                break;
            }
        }
        LengthSpec::from_parts(parts)
    }

    fn lex_note(&mut self) -> Option<TokenKind> {
        let letter = self.advance();
        let accidental = match self.chars.get(self.pos).copied().and_then(Accidental::from_char) {
            Some(acc) => {
                self.advance();
                acc
            }
            None => Accidental::Natural,
        };
        let pitch = Pitch::new(letter, accidental)?;
        let length = self.lex_length();
        Some(TokenKind::Note { pitch, length })
    }

    /// `@N`, `@e…`, `@h…`, `@u…`.
    fn lex_at_directive(&mut self) -> Option<TokenKind> {
        self.advance(); // consume '@'
        if self.is_at_end() {
            return None;
        }

        match self.peek() {
            '0'..='9' => self
                .lex_digits()
                .map(|d| TokenKind::WaveformSelect(parse_saturating(&d))),
            'e' => {
                self.advance();
                Some(TokenKind::Envelope(self.lex_params()))
            }
            'h' => {
                self.advance();
                Some(TokenKind::Harmony(self.lex_params()))
            }
            'u' => {
                self.advance();
                Some(TokenKind::Unison(self.lex_params()))
            }
            _ => None,
        }
    }

    /// `#` + effect letter + parameters.
    fn lex_effect(&mut self) -> Option<TokenKind> {
        self.advance(); // consume '#'
        if self.is_at_end() || !self.peek().is_ascii_lowercase() {
            return None;
        }
        let kind = self.advance();
        let params = self.lex_params();
        Some(TokenKind::Effect { kind, params })
    }
}

/// Parse an all-digit string, saturating instead of overflowing.
fn parse_saturating(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
