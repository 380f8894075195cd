//! Note lengths — fractional denominators, dots, and ties.
//!
//! A length like `4.&16` reads "dotted quarter tied to a sixteenth". Each part
//! lasts `240 / tempo / denominator` seconds (a whole note is four beats), a dot
//! multiplies that part by 1.5, and tied parts add up.

/// One denominator of a length, optionally dotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPart {
    pub denominator: u32,
    pub dotted: bool,
}

impl LengthPart {
    /// Duration of this part in seconds at `tempo` beats per minute.
    pub fn seconds(&self, tempo: f64) -> f64 {
        let base = 240.0 / tempo / self.denominator as f64;
        if self.dotted {
            base * 1.5
        } else {
            base
        }
    }
}

/// A tied sequence of one or more [`LengthPart`]s.
///
/// Never empty; constructors drop zero denominators and return `None` if nothing
/// usable remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthSpec {
    parts: Vec<LengthPart>,
}

impl LengthSpec {
    /// Build from parts, discarding zero denominators.
    pub fn from_parts(parts: impl IntoIterator<Item = LengthPart>) -> Option<Self> {
        let parts: Vec<LengthPart> = parts.into_iter().filter(|p| p.denominator > 0).collect();
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }

    /// A single undotted denominator.
    pub fn single(denominator: u32) -> Option<Self> {
        Self::from_parts([LengthPart {
            denominator,
            dotted: false,
        }])
    }

    /// Parse the textual form, e.g. `"8"`, `"4."`, `"4&8"`.
    ///
    /// Parts without digits are skipped, the same way the lexer treats them.
    pub fn parse(s: &str) -> Option<Self> {
        let parts = s.split('&').filter_map(|part| {
            let (digits, dotted) = match part.strip_suffix('.') {
                Some(d) => (d, true),
                None => (part, false),
            };
            let denominator = digits.parse::<u32>().ok()?;
            Some(LengthPart {
                denominator,
                dotted,
            })
        });
        Self::from_parts(parts)
    }

    /// The tied parts, in source order.
    pub fn parts(&self) -> &[LengthPart] {
        &self.parts
    }

    /// Total duration in seconds at `tempo` beats per minute.
    pub fn seconds(&self, tempo: f64) -> f64 {
        self.parts.iter().map(|p| p.seconds(tempo)).sum()
    }

    /// Total duration in whole samples (floored).
    pub fn samples(&self, tempo: f64, sample_rate: u32) -> usize {
        (self.seconds(tempo) * sample_rate as f64).floor() as usize
    }
}

impl Default for LengthSpec {
    /// An eighth note.
    fn default() -> Self {
        Self {
            parts: vec![LengthPart {
                denominator: 8,
                dotted: false,
            }],
        }
    }
}
