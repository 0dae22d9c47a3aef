//! confbind - inspect a config file and its environment overrides.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment fallbacks.
//! - Run the selected command against the `confbind` library.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Loading or resolving config values (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so stdout stays machine-readable.

mod args;
mod commands;
mod error;
mod formatters;

use args::{Cli, Commands};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Keys(args) => commands::keys::run(args),
        Commands::Check(args) => commands::check::run(args),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
