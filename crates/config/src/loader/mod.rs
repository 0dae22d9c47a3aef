//! Configuration loading pipeline.
//!
//! Responsibilities:
//! - Provide the builder-pattern `ConfigLoader` and the `load_configs` shortcut.
//! - Define the unified `ConfigError` type.
//! - Verify after unmarshal that every known key resolved (`validate`).
//!
//! Does NOT handle:
//! - File parsing and environment access (see `source`).
//! - Record shapes and field conversion (see `schema` and `value`).
//!
//! Invariants / Assumptions:
//! - Stages run in order: read file, bind keys, unmarshal, validate.
//! - Any failing stage aborts the load; there is no partial success.

mod builder;
mod error;
mod validate;

pub use builder::{ConfigLoader, load_configs};
pub use error::{ConfigError, ErrorKind};
pub use validate::{check_missing, missing_keys};

#[cfg(test)]
mod tests;
