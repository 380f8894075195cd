//! Feedback echo over a fixed circular delay line.

/// Feedback delay.
///
/// Each output is the input plus `feedback` times the sample written one delay
/// length ago. The output is written back into the line, so repeats decay
/// geometrically.
///
/// The line fills as samples arrive rather than being allocated up front, so its
/// memory never exceeds the number of samples actually processed.
#[derive(Debug, Clone)]
pub struct Echo {
    buffer: Vec<f64>,
    delay: usize,
    pos: usize,
    feedback: f64,
}

impl Echo {
    /// `feedback` is capped at 1.0. A zero-length delay passes audio through unchanged.
    pub fn new(feedback: f64, delay_samples: usize) -> Self {
        Self {
            buffer: Vec::new(),
            delay: delay_samples,
            pos: 0,
            feedback: feedback.min(1.0),
        }
    }

    pub fn feedback(&self) -> f64 {
        self.feedback
    }

    pub fn delay_samples(&self) -> usize {
        self.delay
    }

    /// Process one sample.
    #[inline]
    pub fn apply(&mut self, input: f64) -> f64 {
        if self.delay == 0 {
            return input;
        }
        // First pass through the line: nothing to repeat yet.
        if self.buffer.len() < self.delay {
            self.buffer.push(input);
            return input;
        }
        let output = input + self.feedback * self.buffer[self.pos];
        self.buffer[self.pos] = output;
        self.pos = (self.pos + 1) % self.delay;
        output
    }
}
