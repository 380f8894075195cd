//! End-to-end tests — MML source → tokens → interpreter → effects → PCM → WAV.
//!
//! Everything runs offline at 44.1 kHz; no audio device involved.

use std::io::Cursor;

use dischord::audio::{encode_wav, to_le_bytes};
use dischord::{compose, tokenize, Composer, RenderConfig};

const SAMPLE_RATE: u32 = 44100;

fn rms(samples: &[i16]) -> f64 {
    let sum: f64 = samples.iter().map(|&s| (s as f64).powi(2)).sum();
    (sum / samples.len() as f64).sqrt()
}

/// Count negative-to-positive transitions.
fn rising_edges(samples: &[i16]) -> usize {
    samples.windows(2).filter(|w| w[0] < 0 && w[1] >= 0).count()
}

// =============================================================================
// Timing and pitch
// =============================================================================

#[test]
fn quarter_note_at_120_is_half_a_second() {
    let pcm = compose("t120 l4 c", SAMPLE_RATE);
    assert_eq!(pcm.len(), 22050);
}

#[test]
fn reference_c_is_near_523_hz() {
    // Default square wave never falls under the gate threshold, so all
    // 22050 samples are tone.
    let pcm = compose("c4", SAMPLE_RATE);
    let cycles = 523.251 * 0.5;
    let edges = rising_edges(&pcm) as f64;
    assert!((edges - cycles).abs() <= 2.0, "{edges} rising edges, expected ~{cycles}");
}

#[test]
fn octave_up_doubles_pitch() {
    let low = rising_edges(&compose("c4", SAMPLE_RATE)) as f64;
    let high = rising_edges(&compose("< c4", SAMPLE_RATE)) as f64;
    assert!((high / low - 2.0).abs() < 0.02, "ratio {}", high / low);
}

#[test]
fn sine_note_starts_at_zero() {
    let pcm = compose("@5 c4", SAMPLE_RATE);
    assert_eq!(pcm[0], 0);
}

#[test]
fn tied_and_dotted_lengths() {
    let tied = compose("c4&8", SAMPLE_RATE).len();
    let dotted = compose("c4.", SAMPLE_RATE).len();
    assert_eq!(tied, 22050 + 11025);
    assert_eq!(dotted, tied);
}

// =============================================================================
// Structure: rests, loops, voices
// =============================================================================

#[test]
fn rest_is_silent() {
    let pcm = compose("r4", SAMPLE_RATE);
    assert_eq!(pcm.len(), 22050);
    assert!(pcm.iter().all(|&s| s == 0));
}

#[test]
fn loop_equals_written_out_repeat() {
    let looped = compose("[c4 e8]3", SAMPLE_RATE);
    let written = compose("c4 e8 c4 e8 c4 e8", SAMPLE_RATE);
    assert_eq!(looped, written);
}

#[test]
fn voices_overlay_from_start() {
    let one = compose("c4", SAMPLE_RATE);
    let two = compose("c4 ; g4", SAMPLE_RATE);
    assert_eq!(one.len(), two.len());
    assert_ne!(one, two);
}

#[test]
fn shorter_second_voice_does_not_extend_output() {
    let pcm = compose("c2 ; e8", SAMPLE_RATE);
    assert_eq!(pcm.len(), 44100);
}

// =============================================================================
// Effects and levels
// =============================================================================

#[test]
fn low_pass_attenuates_tone_above_cutoff() {
    let window = 10_000..40_000;
    let dry = compose("@5 < c1", SAMPLE_RATE);
    let wet = compose("#l200,0 @5 < c1", SAMPLE_RATE);
    let dry_rms = rms(&dry[window.clone()]);
    let wet_rms = rms(&wet[window]);
    assert!(dry_rms > 1000.0, "dry rms {dry_rms}");
    assert!(wet_rms < dry_rms * 0.2, "wet {wet_rms} vs dry {dry_rms}");
}

#[test]
fn high_pass_keeps_tone_above_cutoff() {
    let window = 10_000..40_000;
    let dry = compose("@5 < c1", SAMPLE_RATE);
    let wet = compose("#h100,0 @5 < c1", SAMPLE_RATE);
    let ratio = rms(&wet[window.clone()]) / rms(&dry[window]);
    assert!(ratio > 0.9 && ratio < 1.1, "ratio {ratio}");
}

#[test]
fn loud_input_is_clamped_to_full_scale() {
    let pcm = compose("v300 @u5,50 c4 ; v300 e4", SAMPLE_RATE);
    assert!(pcm.iter().all(|&s| (-32767..=32767).contains(&s)));
    assert!(pcm.iter().any(|&s| s == 32767));
}

#[test]
fn volume_scales_square_amplitude() {
    let pcm = compose("v25 c4", SAMPLE_RATE);
    assert_eq!(pcm[0], (0.25 * 32767.0f64).floor() as i16);
}

// =============================================================================
// Composer configuration
// =============================================================================

#[test]
fn seeded_noise_is_repeatable_across_composers() {
    let a = Composer::new(SAMPLE_RATE).with_seed(9).compose("@6 c4");
    let b = Composer::new(SAMPLE_RATE).with_seed(9).compose("@6 c4");
    assert_eq!(a, b);
}

#[test]
fn config_duration_cap_truncates() {
    let config = RenderConfig {
        max_duration_secs: Some(0.25),
        ..RenderConfig::default()
    };
    let pcm = config.composer().compose("c1 c1 c1");
    assert_eq!(pcm.len(), 11025);
}

#[test]
fn config_duration_cap_cuts_a_single_long_note() {
    let config = RenderConfig {
        sample_rate: 8000,
        max_duration_secs: Some(0.5),
        ..RenderConfig::default()
    };
    assert_eq!(config.composer().compose("t1 c1").len(), 4000);
}

#[test]
fn lower_sample_rate_scales_length() {
    assert_eq!(compose("c4", 8000).len(), 4000);
}

// =============================================================================
// Output encoding
// =============================================================================

#[test]
fn raw_bytes_are_little_endian_pcm() {
    let pcm = compose("v25 c8", SAMPLE_RATE);
    let bytes = to_le_bytes(&pcm);
    assert_eq!(bytes.len(), pcm.len() * 2);
    assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), pcm[0]);
    assert_eq!(Composer::new(SAMPLE_RATE).compose_bytes("v25 c8"), bytes);
}

#[test]
fn wav_round_trips_through_hound() {
    let pcm = compose("t150 l8 cdefgab<c", SAMPLE_RATE);
    let bytes = encode_wav(&pcm, SAMPLE_RATE).expect("encode failed");

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).expect("invalid wav");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);

    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, pcm);
}

#[test]
fn tokens_expose_source_offsets() {
    let tokens = tokenize("t120 c4");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].offset, 0);
    assert_eq!(tokens[1].offset, 5);
}
