//! Key paths and their environment-variable spelling.
//!
//! Responsibilities:
//! - Represent a configuration key as an ordered list of segments.
//! - Serialize keys as `a.b.c` for store lookup and `A_B_C` for the environment.
//!
//! Invariants:
//! - Segments are stored lower-cased; key lookup is case-insensitive.
//! - The environment name is always derived from the dotted form, never stored.

use std::fmt;

/// Separator between segments in the dotted (lookup) spelling.
pub const KEY_SEPARATOR: char = '.';

/// Separator between segments in the environment-variable spelling.
pub const ENV_SEPARATOR: char = '_';

/// An ordered sequence of tag segments identifying one configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path, i.e. the root of a record.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted key such as `server.host`.
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split(KEY_SEPARATOR)
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Return a new path with `tag` appended.
    ///
    /// A tag containing dots contributes several segments.
    pub fn child(&self, tag: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(tag.split(KEY_SEPARATOR).map(|s| s.to_lowercase()));
        Self { segments }
    }

    /// Prepend `prefix` to this path.
    pub fn prefixed(&self, prefix: &KeyPath) -> Self {
        let mut segments = prefix.segments.clone();
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when any segment is empty (e.g. `a..b` or a blank tag).
    pub fn has_empty_segment(&self) -> bool {
        self.segments.iter().any(|s| s.trim().is_empty())
    }

    /// Dotted spelling used for store lookups: `server.host`.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Environment-variable spelling: `SERVER_HOST`.
    pub fn env_name(&self) -> String {
        env_name(&self.dotted())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Map a dotted key to the name of its override variable.
///
/// `database.pool.max_size` becomes `DATABASE_POOL_MAX_SIZE`.
pub fn env_name(dotted: &str) -> String {
    dotted.replace(KEY_SEPARATOR, "_").to_uppercase()
}
