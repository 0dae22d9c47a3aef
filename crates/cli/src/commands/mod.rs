//! CLI command implementations.

pub mod check;
pub mod keys;

use anyhow::{Context, Result};
use confbind::{ConfigLoader, Store};

use crate::args::SourceArgs;

/// Read the config file named by `args` and apply its overrides and required keys.
pub fn open_store(args: &SourceArgs) -> Result<Store> {
    let mut loader = ConfigLoader::new(args.dir.clone(), args.name.clone());
    for key in &args.required {
        loader = loader.require(key);
    }
    for (key, value) in &args.overrides {
        loader = loader.with_override(key, value.as_str());
    }

    loader.read_store().with_context(|| {
        format!(
            "Failed to read config '{}' in {}",
            args.name,
            args.dir.display()
        )
    })
}
