//! Render configuration — defaults for sample rate, noise seed and limits,
//! loaded from ~/.dischord/config.yaml.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mml::Composer;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Render settings loaded from YAML. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_sample_rate")]
    pub sample_rate: u32,
    /// Seed for the white-noise generator. None = fresh entropy per render.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Reject sources longer than this many characters.
    #[serde(default)]
    pub max_source_len: Option<usize>,
    /// Stop rendering once this much audio has been produced.
    #[serde(default)]
    pub max_duration_secs: Option<f64>,
}

impl RenderConfig {
    /// Load config from the standard path (~/.dischord/config.yaml).
    /// Returns None if the file doesn't exist or doesn't parse (graceful fallback).
    pub fn load() -> Option<Self> {
        let home = dirs::home_dir()?;
        let path = home.join(".dischord").join("config.yaml");
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load config from an explicit path, reporting why it failed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn default_sample_rate() -> u32 {
        DEFAULT_SAMPLE_RATE
    }

    /// Check `source` against `max_source_len`.
    pub fn check_source(&self, source: &str) -> Result<()> {
        match self.max_source_len {
            Some(max) => {
                let len = source.chars().count();
                if len > max {
                    Err(Error::SourceTooLong { len, max })
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }

    /// `max_duration_secs` in samples at the configured rate.
    pub fn max_samples(&self) -> Option<usize> {
        self.max_duration_secs
            .map(|secs| (secs.max(0.0) * self.sample_rate as f64).floor() as usize)
    }

    /// A composer set up with this config's rate, seed and duration cap.
    pub fn composer(&self) -> Composer {
        let mut composer = Composer::new(self.sample_rate).with_max_samples(self.max_samples());
        if let Some(seed) = self.seed {
            composer = composer.with_seed(seed);
        }
        composer
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
            max_source_len: None,
            max_duration_secs: None,
        }
    }
}
