//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `KEY=VALUE` override arguments.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confbind")]
#[command(about = "Inspect config files and their environment overrides", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confbind keys --dir ./config --name app\n  confbind check --dir ./config --name app --require database.url\n  DATABASE_URL=postgres://db confbind keys -d ./config -n app -o json\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every known key with its environment variable and resolved value
    Keys(SourceArgs),

    /// Fail if any known key resolves to no value
    Check(SourceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory containing the config file
    #[arg(short, long, env = "CONFBIND_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Base name of the config file, without extension
    #[arg(short, long, env = "CONFBIND_NAME")]
    pub name: String,

    /// Additional key that must resolve (dotted form, repeatable)
    #[arg(short, long = "require", value_name = "KEY")]
    pub required: Vec<String>,

    /// Override a key with a value (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Parse `key=value`; the value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
