//! Effect chain — stateful per-sample processors applied in the order they were added.

pub mod biquad;
pub mod echo;

pub use biquad::{Biquad, FilterType};
pub use echo::Echo;

use std::f64::consts::FRAC_1_SQRT_2;

/// One stage of the chain.
#[derive(Debug, Clone)]
pub enum Effect {
    Filter(Biquad),
    Echo(Echo),
}

impl Effect {
    /// Low/high-pass from `#l`/`#h` parameters: cutoff in Hz and resonance in
    /// percent, mapped to `Q = resonance/100 + 1/√2`.
    pub fn filter(filter_type: FilterType, cutoff: f64, resonance: f64, sample_rate: u32) -> Self {
        let q = resonance / 100.0 + FRAC_1_SQRT_2;
        Effect::Filter(Biquad::new(filter_type, cutoff, q, sample_rate))
    }

    /// Echo from `#e` parameters: feedback in percent and delay in seconds.
    pub fn echo(feedback: f64, delay_secs: f64, sample_rate: u32) -> Self {
        let delay_samples = (delay_secs * sample_rate as f64).floor() as usize;
        Effect::Echo(Echo::new(feedback / 100.0, delay_samples))
    }

    #[inline]
    pub fn apply(&mut self, input: f64) -> f64 {
        match self {
            Effect::Filter(f) => f.apply(input),
            Effect::Echo(e) => e.apply(input),
        }
    }
}

/// Ordered list of effects. Stages are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct EffectChain {
    effects: Vec<Effect>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Run `input` through every stage in order.
    #[inline]
    pub fn apply(&mut self, input: f64) -> f64 {
        self.effects
            .iter_mut()
            .fold(input, |acc, effect| effect.apply(acc))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
}
