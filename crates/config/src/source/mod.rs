//! Source loading: config files plus environment overrides.
//!
//! Responsibilities:
//! - Find and parse the named config file (`format`).
//! - Provide injectable environment access (`env`).
//! - Expose the merged key-value `Store` used by the binder and validator.
//!
//! Does NOT handle:
//! - Record schemas or field conversion (see `schema` and `value`).

pub mod env;
pub mod format;
mod store;

pub use env::{EnvSource, MapEnv, ProcessEnv, env_var_or_none};
pub use format::{FileFormat, SUPPORTED_EXTENSIONS};
pub use store::{Store, ValueSource};
