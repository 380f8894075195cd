//! Biquad filter — RBJ cookbook low-pass and high-pass.

use std::f64::consts::PI;

/// Filter response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

/// Normalised coefficients (every term already divided by `a0`).
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Coefficients {
    fn new(filter_type: FilterType, cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * cutoff / sample_rate;
        let (sin_w, cos_w) = omega.sin_cos();
        let alpha = sin_w / (2.0 * q);

        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w;
        let a2 = 1.0 - alpha;

        let (b0, b1, b2) = match filter_type {
            FilterType::LowPass => {
                let b1 = 1.0 - cos_w;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            FilterType::HighPass => {
                let b1 = -(1.0 + cos_w);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
        };

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Second-order IIR filter with direct-form-I history.
///
/// Coefficients are fixed at construction; only the two input and two output
/// history samples change while processing.
#[derive(Debug, Clone)]
pub struct Biquad {
    filter_type: FilterType,
    cutoff: f64,
    q: f64,
    coeffs: Coefficients,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Create a filter. `cutoff` is clamped into `[1 Hz, 0.49 * sample_rate]`.
    pub fn new(filter_type: FilterType, cutoff: f64, q: f64, sample_rate: u32) -> Self {
        let sample_rate = sample_rate as f64;
        let cutoff = cutoff.min(sample_rate * 0.49).max(1.0);
        Self {
            filter_type,
            cutoff,
            q,
            coeffs: Coefficients::new(filter_type, cutoff, q, sample_rate),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn low_pass(cutoff: f64, q: f64, sample_rate: u32) -> Self {
        Self::new(FilterType::LowPass, cutoff, q, sample_rate)
    }

    pub fn high_pass(cutoff: f64, q: f64, sample_rate: u32) -> Self {
        Self::new(FilterType::HighPass, cutoff, q, sample_rate)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Effective cutoff after clamping.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Process one sample.
    #[inline]
    pub fn apply(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}
