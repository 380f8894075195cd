//! Errors at the crate's I/O boundary.
//!
//! Rendering itself never fails; these cover config files, WAV output and the
//! limits a host puts on what it will render.

/// Boundary error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV encoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Config file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Source text exceeds the configured limit.
    #[error("source is {len} characters, limit is {max}")]
    SourceTooLong { len: usize, max: usize },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, Error>;
