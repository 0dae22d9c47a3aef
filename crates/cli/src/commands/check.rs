//! Check command implementation.
//!
//! Responsibilities:
//! - Verify every known key resolves, failing with the missing-key list.

use anyhow::Result;
use confbind::check_missing;

use super::open_store;
use crate::args::SourceArgs;
use crate::formatters::{CheckOutput, get_formatter};

pub fn run(args: &SourceArgs) -> Result<()> {
    let store = open_store(args)?;
    check_missing(&store)?;

    let output = CheckOutput {
        ok: true,
        file: store.path().map(|p| p.display().to_string()),
        keys: store.all_keys().len(),
    };
    println!("{}", get_formatter(args.output).format_check(&output)?);
    Ok(())
}
