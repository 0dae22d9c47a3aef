//! Environment variable access for override lookups.
//!
//! Responsibilities:
//! - Abstract environment access behind `EnvSource` so lookups can be injected.
//! - Provide the process-backed source and an in-memory source for tests.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::collections::HashMap;

/// A read-only key-value provider consulted for environment overrides.
pub trait EnvSource {
    /// Return the raw value of `name`, or `None` when it is not set.
    fn raw(&self, name: &str) -> Option<String>;

    /// Return the value of `name`, filtering empty and whitespace-only values.
    fn var(&self, name: &str) -> Option<String> {
        self.raw(name).and_then(non_blank)
    }
}

/// Reads variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn raw(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// An in-memory environment, used to make loads independent of the process.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, returning the source for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn raw(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn raw(&self, name: &str) -> Option<String> {
        (**self).raw(name)
    }
}

impl<E: EnvSource + ?Sized> EnvSource for Box<E> {
    fn raw(&self, name: &str) -> Option<String> {
        (**self).raw(name)
    }
}

/// Read a process environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    ProcessEnv.var(key)
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        // No trimming needed, return original to avoid allocation
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}
