//! Preset and settings errors.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong loading, saving or applying a preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset or settings file could not be read.
    #[error("cannot read '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A preset file could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The preset or config directory could not be created.
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value could not be encoded as TOML.
    #[error("cannot encode TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No file, user preset or factory preset has this name.
    #[error("no preset named '{0}'")]
    PresetNotFound(String),

    /// Key that names none of the reverb parameters.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Value outside its parameter's range.
    #[error("invalid value {value} for parameter '{param}': {reason}")]
    InvalidValue {
        /// String ID of the parameter.
        param: String,
        /// Offending value.
        value: f64,
        /// What was expected instead.
        reason: String,
    },
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}
