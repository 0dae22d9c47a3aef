//! Keys command implementation.
//!
//! Responsibilities:
//! - List every known key with its environment name, source layer and value.
//!
//! Does NOT handle:
//! - Failing on unresolved keys (see `check`).

use anyhow::Result;
use confbind::{Store, env_name};
use tracing::info;

use super::open_store;
use crate::args::SourceArgs;
use crate::formatters::{KeyRow, get_formatter};

pub fn run(args: &SourceArgs) -> Result<()> {
    let store = open_store(args)?;
    let rows = key_rows(&store);
    info!(keys = rows.len(), "Listing config keys");

    let output = get_formatter(args.output).format_keys(&rows)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Build one row per known key, sorted by key.
pub fn key_rows(store: &Store) -> Vec<KeyRow> {
    store
        .all_keys()
        .into_iter()
        .map(|key| KeyRow {
            env: env_name(&key),
            source: store.source_of(&key),
            value: store.get(&key),
            key,
        })
        .collect()
}
