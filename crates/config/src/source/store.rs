//! The binding store: merged view of file values and overrides.
//!
//! Responsibilities:
//! - Hold the parsed file tree, explicit overrides and registered keys for one load.
//! - Resolve keys lazily: override, then environment variable, then file value.
//! - Enumerate every known key (file leaves, registered keys, overrides).
//!
//! Does NOT handle:
//! - Converting values into record fields (see schema.rs).
//! - Deciding which keys are required (see loader/validate.rs).
//!
//! Invariants:
//! - Keys are case-insensitive; they are lower-cased on every entry point.
//! - A null anywhere (file value, missing env, missing override) resolves to `None`.
//! - Overrides follow the environment's blank rule: an empty or whitespace-only
//!   string override is unset and falls through to the next layer.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use super::env::{EnvSource, ProcessEnv};
use super::format::{self, FileFormat};
use crate::key::{KeyPath, env_name};
use crate::loader::ConfigError;

/// The layer a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Override,
    Env,
    File,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueSource::Override => "override",
            ValueSource::Env => "env",
            ValueSource::File => "file",
        };
        f.write_str(name)
    }
}

/// Merged key-value view for a single load call.
pub struct Store {
    file: Map<String, Value>,
    overrides: BTreeMap<String, Value>,
    bound: BTreeSet<String>,
    env: Box<dyn EnvSource>,
    path: Option<PathBuf>,
    format: Option<FileFormat>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("file_keys", &format::leaf_keys(&self.file))
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .field("bound", &self.bound)
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(ProcessEnv)
    }
}

impl Store {
    /// Create an empty store reading overrides from `env`.
    pub fn new(env: impl EnvSource + 'static) -> Self {
        Self {
            file: Map::new(),
            overrides: BTreeMap::new(),
            bound: BTreeSet::new(),
            env: Box::new(env),
            path: None,
            format: None,
        }
    }

    /// Create a store over an already-parsed tree.
    pub fn from_tree(tree: Map<String, Value>, env: impl EnvSource + 'static) -> Self {
        let mut store = Self::new(env);
        store.file = tree;
        store
    }

    /// Locate `<dir>/<name>.<ext>`, parse it and wrap it in a store.
    pub fn read_file(
        dir: impl AsRef<Path>,
        name: &str,
        env: impl EnvSource + 'static,
    ) -> Result<Self, ConfigError> {
        let (path, format) = format::locate(dir.as_ref(), name)?;
        let tree = format::read_tree(&path, format)?;

        tracing::info!(
            path = %path.display(),
            format = %format,
            keys = format::leaf_keys(&tree).len(),
            "Loaded config file"
        );

        let mut store = Self::from_tree(tree, env);
        store.path = Some(path);
        store.format = Some(format);
        Ok(store)
    }

    /// Path of the file this store was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> Option<FileFormat> {
        self.format
    }

    /// Register `key` as known so it is validated even when absent from the file.
    pub fn bind_env(&mut self, key: &str) {
        let key = key.to_lowercase();
        tracing::debug!(key = %key, env = %env_name(&key), "Registered config key");
        self.bound.insert(key);
    }

    /// Set an explicit override; it wins over environment and file values.
    ///
    /// A blank string override is unset, like a blank environment variable.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.overrides.insert(key.to_lowercase(), value.into());
    }

    /// Resolve `key`, returning `None` when it has no non-null value.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.resolve(key).map(|(value, _)| value)
    }

    /// Report which layer resolves `key`.
    pub fn source_of(&self, key: &str) -> Option<ValueSource> {
        self.resolve(key).map(|(_, source)| source)
    }

    /// True when `key` resolves to a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Every key this store knows about, in sorted dotted form.
    pub fn all_keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = format::leaf_keys(&self.file).into_iter().collect();
        keys.extend(self.bound.iter().cloned());
        keys.extend(self.overrides.keys().cloned());
        keys
    }

    fn resolve(&self, key: &str) -> Option<(Value, ValueSource)> {
        let key = key.to_lowercase();

        if let Some(value) = self.overrides.get(&key).filter(|v| !is_blank(v)) {
            return Some((value.clone(), ValueSource::Override));
        }

        if let Some(value) = self.env.var(&env_name(&key)) {
            return Some((Value::String(value), ValueSource::Env));
        }

        self.file_value(&KeyPath::parse(&key))
            .map(|value| (value.clone(), ValueSource::File))
    }

    fn file_value(&self, key: &KeyPath) -> Option<&Value> {
        let (first, rest) = key.segments().split_first()?;
        let mut current = self.file.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
