//! Render defaults read from `settings.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Output sample format choices.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Longest tail the renderer will append.
pub const MAX_TAIL_SECONDS: f32 = 600.0;

/// Defaults the renderer uses when a flag is not given.
///
/// Missing keys fall back to [`Settings::default`].
///
/// ```toml
/// block_size = 256
/// bit_depth = 24
/// tail_seconds = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Samples per processing block.
    pub block_size: usize,
    /// Output bit depth (16 and 24 are integer PCM, 32 is float).
    pub bit_depth: u16,
    /// Silence appended after the input so the tail can ring out.
    pub tail_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_size: 512,
            bit_depth: 24,
            tail_seconds: 2.0,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the renderer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::InvalidValue {
                param: "block_size".to_string(),
                value: 0.0,
                reason: "must be at least 1".to_string(),
            });
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::InvalidValue {
                param: "bit_depth".to_string(),
                value: f64::from(self.bit_depth),
                reason: "expected 16, 24 or 32".to_string(),
            });
        }
        if !(0.0..=MAX_TAIL_SECONDS).contains(&self.tail_seconds) {
            return Err(ConfigError::InvalidValue {
                param: "tail_seconds".to_string(),
                value: f64::from(self.tail_seconds),
                reason: format!("expected 0 to {MAX_TAIL_SECONDS} seconds"),
            });
        }
        Ok(())
    }
}
