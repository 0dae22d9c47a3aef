//! Shared test utilities for confbind CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write config files into temporary directories.
//!
//! Invariants / Assumptions:
//! - Variables the fixtures use are cleared so host values never leak in.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Variables consulted by the fixtures in these tests.
const FIXTURE_VARS: &[&str] = &[
    "CONFBIND_DIR",
    "CONFBIND_NAME",
    "HOST",
    "PORT",
    "DB_URL",
    "DB_POOL",
    "TIMEOUT",
];

/// Returns a hermetic `confbind` command for integration testing.
pub fn confbind_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confbind");
    for var in FIXTURE_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a temp dir holding a single config file.
pub fn config_dir(file: &str, content: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(dir.path(), file, content);
    dir
}

pub fn write_file(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).expect("Failed to write config file");
}
