//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every stage: file load, schema walk, unmarshal, validation.
//! - Group variants into coarse kinds so callers (the CLI) can map them to exit codes.
//!
//! Invariants:
//! - All error variants include context for debugging (key names, paths, etc.).
//! - `MissingKeys` carries the complete sorted list, never just the first gap.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file \"{name}\" not found in {dir}")]
    NotFound { name: String, dir: PathBuf },

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("Duplicate config key '{0}' declared by more than one field")]
    DuplicateKey(String),

    #[error("Invalid config key '{key}': {message}")]
    InvalidKey { key: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing env: {}", .0.join(","))]
    MissingKeys(Vec<String>),
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be found, read or parsed.
    Load,
    /// The record's declared shape is unusable.
    Schema,
    /// A resolved value does not fit the field's type.
    Unmarshal,
    /// One or more known keys resolved to nothing.
    Missing,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NotFound { .. }
            | ConfigError::ConfigFileRead { .. }
            | ConfigError::ConfigFileParse { .. } => ErrorKind::Load,
            ConfigError::DuplicateKey(_) | ConfigError::InvalidKey { .. } => ErrorKind::Schema,
            ConfigError::InvalidValue { .. } => ErrorKind::Unmarshal,
            ConfigError::MissingKeys(_) => ErrorKind::Missing,
        }
    }

    /// The missing environment names, if this is a validation failure.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            ConfigError::MissingKeys(keys) => Some(keys),
            _ => None,
        }
    }
}
