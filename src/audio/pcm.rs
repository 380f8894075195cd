//! Output quantizer — hard clamp to `[-1, 1]`, then signed 16-bit PCM.

/// Full-scale 16-bit amplitude. The negative extreme is never produced.
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Clamp and quantize one sample. NaN becomes silence.
#[inline]
pub fn quantize_sample(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * FULL_SCALE).floor() as i16
}

/// Quantize a whole timeline.
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples.iter().map(|&s| quantize_sample(s)).collect()
}

/// Encode PCM samples as little-endian bytes, two per sample.
pub fn to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}
