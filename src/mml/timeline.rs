//! Sample timeline with overlay-add writes.
//!
//! Voices started after a `;` rewind write over the same positions as earlier
//! voices, so every write sums into what is already there. The buffer only grows.

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    samples: Vec<f64>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` into position `index`, growing the buffer with silence if needed.
    #[inline]
    pub fn overlay(&mut self, index: usize, value: f64) {
        if index < self.samples.len() {
            self.samples[index] += value;
        } else {
            self.samples.resize(index, 0.0);
            self.samples.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut tl = Timeline::new();
        tl.overlay(0, 0.1);
        tl.overlay(1, 0.2);
        assert_eq!(tl.samples(), &[0.1, 0.2]);
    }

    #[test]
    fn overlay_sums() {
        let mut tl = Timeline::new();
        tl.overlay(0, 0.25);
        tl.overlay(0, 0.5);
        assert_eq!(tl.samples(), &[0.75]);
    }

    #[test]
    fn gap_filled_with_silence() {
        let mut tl = Timeline::new();
        tl.overlay(3, 1.0);
        assert_eq!(tl.samples(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn empty() {
        let tl = Timeline::new();
        assert!(tl.is_empty());
        assert_eq!(tl.len(), 0);
    }
}
