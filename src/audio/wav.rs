//! WAV container — wraps rendered PCM in a RIFF/WAVE header via hound.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::Result;

/// Mono 16-bit integer spec at `sample_rate`.
pub fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn fill<W: Write + Seek>(mut wav: WavWriter<W>, samples: &[i16]) -> Result<()> {
    for &s in samples {
        wav.write_sample(s)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write `samples` to a WAV file at `path`.
pub fn write_wav(path: impl AsRef<Path>, samples: &[i16], sample_rate: u32) -> Result<()> {
    fill(WavWriter::create(path, spec(sample_rate))?, samples)
}

/// Encode `samples` as a complete in-memory WAV file.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    fill(WavWriter::new(&mut cursor, spec(sample_rate))?, samples)?;
    Ok(cursor.into_inner())
}
