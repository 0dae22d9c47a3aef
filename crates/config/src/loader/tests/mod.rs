//! Tests for the configuration loader pipeline.
//!
//! Responsibilities:
//! - Test the full load: file read, key binding, unmarshal and validation.
//! - Test environment precedence using both injected and process environments.
//! - Test error reporting for each failing stage.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::Path;
use std::sync::Mutex;

use crate::schema::{ConfigRecord, Schema};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `content` to `<dir>/<file>`.
pub fn write_config(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).unwrap();
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServerSection {
    pub host: String,
}

impl ConfigRecord for ServerSection {
    fn describe(schema: &mut Schema<Self>) {
        schema.field("host", |s| &mut s.host);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DbSection {
    pub port: u16,
}

impl ConfigRecord for DbSection {
    fn describe(schema: &mut Schema<Self>) {
        schema.field("port", |d| &mut d.port);
    }
}

/// Both sections squashed into the root: keys `host` and `port`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlatConfig {
    pub server: ServerSection,
    pub db: DbSection,
}

impl ConfigRecord for FlatConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema.squash(|c| &mut c.server).squash(|c| &mut c.db);
    }
}

/// Sections nested under their own tags: keys `server.host` and `db.port`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NestedConfig {
    pub server: ServerSection,
    pub db: DbSection,
    pub note: String,
}

impl ConfigRecord for NestedConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .nested("server", |c| &mut c.server)
            .nested("db", |c| &mut c.db);
    }
}
