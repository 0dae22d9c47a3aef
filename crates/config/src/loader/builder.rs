//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` over one directory and base file name.
//! - Run the load pipeline: read file, register record keys, unmarshal, validate.
//! - Allow injecting the environment source, explicit overrides and extra required keys.
//!
//! Does NOT handle:
//! - File discovery and parsing (delegated to source/format.rs).
//! - Value conversion (delegated to value.rs through the record schema).
//!
//! Invariants / Assumptions:
//! - Overrides take precedence over environment variables, which take precedence over the file.
//! - A fresh `Store` is built per load; nothing is cached between calls.
//! - On error the target record may be partially written and must not be used.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::validate::check_missing;
use crate::key::KeyPath;
use crate::schema::{ConfigRecord, Schema};
use crate::source::{EnvSource, ProcessEnv, Store};

/// Configuration loader that binds a named config file and the environment to a record.
pub struct ConfigLoader {
    dir: PathBuf,
    name: String,
    env: Box<dyn EnvSource>,
    overrides: Vec<(String, Value)>,
    required: Vec<String>,
}

impl ConfigLoader {
    /// Create a loader for `<dir>/<name>.<ext>` reading the process environment.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            env: Box::new(ProcessEnv),
            overrides: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Replace the environment consulted for overrides.
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Set a value that wins over both the environment and the file.
    pub fn with_override(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    /// Register a key that must resolve even though no record field declares it.
    pub fn require(mut self, key: &str) -> Self {
        self.required.push(key.to_string());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the file and apply overrides and required keys, without a record.
    pub fn read_store(self) -> Result<Store, ConfigError> {
        let mut store = Store::read_file(&self.dir, &self.name, self.env)?;

        for key in &self.required {
            let path = KeyPath::parse(key);
            if path.has_empty_segment() {
                return Err(ConfigError::InvalidKey {
                    key: key.clone(),
                    message: "key segments must not be empty".to_string(),
                });
            }
            store.bind_env(&path.dotted());
        }

        for (key, value) in self.overrides {
            store.set(&key, value);
        }

        Ok(store)
    }

    /// Populate `cfg` from the file and environment, then verify nothing is missing.
    pub fn load_into<T: ConfigRecord>(self, cfg: &mut T) -> Result<(), ConfigError> {
        let mut store = self.read_store()?;

        let schema = Schema::<T>::of();
        schema.bind(&mut store)?;
        tracing::debug!(fields = schema.len(), "Bound record fields");

        schema.unmarshal(&store, cfg)?;
        check_missing(&store)
    }

    /// Load into a fresh `T::default()`.
    pub fn load<T: ConfigRecord + Default>(self) -> Result<T, ConfigError> {
        let mut cfg = T::default();
        self.load_into(&mut cfg)?;
        Ok(cfg)
    }
}

/// Load `<dir>/<name>.<ext>` into `cfg`, with process environment overrides.
///
/// Fails with [`ConfigError::MissingKeys`] listing every key (as its
/// environment variable name) that resolved to nothing.
pub fn load_configs<T: ConfigRecord>(
    dir: impl AsRef<Path>,
    name: &str,
    cfg: &mut T,
) -> Result<(), ConfigError> {
    ConfigLoader::new(dir.as_ref(), name).load_into(cfg)
}
