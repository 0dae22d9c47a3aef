//! Load a named config file, overlay environment overrides, and bind the
//! result to a typed record.
//!
//! A record declares its keys through [`ConfigRecord`]. For every leaf key
//! `a.b.c` the override variable is `A_B_C`. Loading fails when any known key
//! ends up without a value, listing all of them at once.
//!
//! ```no_run
//! use confbind::{ConfigRecord, Schema, load_configs};
//!
//! #[derive(Default)]
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//! }
//!
//! impl ConfigRecord for Database {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema
//!             .field("url", |d| &mut d.url)
//!             .field("pool_size", |d| &mut d.pool_size);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     database: Database,
//! }
//!
//! impl ConfigRecord for AppConfig {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.nested("database", |c| &mut c.database);
//!     }
//! }
//!
//! let mut cfg = AppConfig::default();
//! // Reads ./config/app.{json,toml,yaml,yml,env}; DATABASE_URL overrides database.url.
//! load_configs("config", "app", &mut cfg)?;
//! # Ok::<(), confbind::ConfigError>(())
//! ```

pub mod key;
mod loader;
pub mod schema;
pub mod source;
pub mod value;

pub use key::{KeyPath, env_name};
pub use loader::{
    ConfigError, ConfigLoader, ErrorKind, check_missing, load_configs, missing_keys,
};
pub use schema::{Binding, ConfigRecord, Schema};
pub use source::{
    EnvSource, FileFormat, MapEnv, ProcessEnv, Store, ValueSource, env_var_or_none,
};
pub use value::FromConfigValue;
