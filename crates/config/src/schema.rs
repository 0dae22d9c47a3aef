//! Declared record shapes and the binder that walks them.
//!
//! A record describes its fields once through [`ConfigRecord::describe`]; the
//! description is a list of leaf bindings, each pairing a [`KeyPath`] with a
//! setter into the record. Nothing here inspects runtime values.
//!
//! ```
//! use confbind::{ConfigRecord, Schema};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl ConfigRecord for Server {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema
//!             .field("host", |s| &mut s.host)
//!             .field("port", |s| &mut s.port);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct App {
//!     server: Server,
//!     // Not described: never bound, validated or written.
//!     started_at: Option<std::time::Instant>,
//! }
//!
//! impl ConfigRecord for App {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.nested("server", |a| &mut a.server);
//!     }
//! }
//!
//! let keys: Vec<String> = Schema::<App>::of().keys().map(|k| k.dotted()).collect();
//! assert_eq!(keys, ["server.host", "server.port"]);
//! ```

use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::key::KeyPath;
use crate::loader::ConfigError;
use crate::source::Store;
use crate::value::FromConfigValue;

/// A caller-defined configuration record with a declared shape.
pub trait ConfigRecord: 'static {
    /// Declare every bound field, in declaration order.
    fn describe(schema: &mut Schema<Self>)
    where
        Self: Sized;
}

type Assign<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), String>>;

/// One leaf field: where it lives in the store and how to write it.
pub struct Binding<T> {
    path: KeyPath,
    assign: Assign<T>,
}

impl<T> Binding<T> {
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    /// Convert `value` and write it into `target`.
    pub fn assign(&self, target: &mut T, value: &Value) -> Result<(), ConfigError> {
        (self.assign)(target, value).map_err(|message| ConfigError::InvalidValue {
            key: self.path.dotted(),
            message,
        })
    }
}

/// The flattened list of leaf bindings for a record type.
pub struct Schema<T> {
    bindings: Vec<Binding<T>>,
}

impl<T: ConfigRecord> Schema<T> {
    /// Build the schema of `T` from its description.
    pub fn of() -> Self {
        let mut schema = Schema {
            bindings: Vec::new(),
        };
        T::describe(&mut schema);
        schema
    }

    /// Bind a leaf field under `tag`.
    pub fn field<F>(&mut self, tag: &str, access: fn(&mut T) -> &mut F) -> &mut Self
    where
        F: FromConfigValue + 'static,
    {
        self.bindings.push(Binding {
            path: KeyPath::root().child(tag),
            assign: Box::new(move |target: &mut T, value: &Value| {
                *access(target) = F::from_config_value(value)?;
                Ok(())
            }),
        });
        self
    }

    /// Bind every field of a nested record under `tag`.
    pub fn nested<U: ConfigRecord>(&mut self, tag: &str, access: fn(&mut T) -> &mut U) -> &mut Self {
        self.embed(&KeyPath::root().child(tag), access)
    }

    /// Bind every field of a nested record directly under this record's path.
    pub fn squash<U: ConfigRecord>(&mut self, access: fn(&mut T) -> &mut U) -> &mut Self {
        self.embed(&KeyPath::root(), access)
    }

    fn embed<U: ConfigRecord>(&mut self, prefix: &KeyPath, access: fn(&mut T) -> &mut U) -> &mut Self {
        for child in Schema::<U>::of().bindings {
            let Binding { path, assign } = child;
            self.bindings.push(Binding {
                path: path.prefixed(prefix),
                assign: Box::new(move |target: &mut T, value: &Value| assign(access(target), value)),
            });
        }
        self
    }
}

impl<T> Schema<T> {
    pub fn bindings(&self) -> &[Binding<T>] {
        &self.bindings
    }

    /// Key paths of every leaf, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyPath> {
        self.bindings.iter().map(Binding::path)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Reject blank segments, paths declared by more than one field, and
    /// distinct paths that share an override variable (`a_b` and `a.b`).
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.bindings.len());
        let mut env_names: HashMap<String, String> = HashMap::with_capacity(self.bindings.len());
        for path in self.keys() {
            if path.is_root() || path.has_empty_segment() {
                return Err(ConfigError::InvalidKey {
                    key: path.dotted(),
                    message: "tags must not be empty".to_string(),
                });
            }
            if !seen.insert(path.dotted()) {
                return Err(ConfigError::DuplicateKey(path.dotted()));
            }
            if let Some(other) = env_names.insert(path.env_name(), path.dotted()) {
                return Err(ConfigError::InvalidKey {
                    key: path.dotted(),
                    message: format!(
                        "override variable {} is already used by '{}'",
                        path.env_name(),
                        other
                    ),
                });
            }
        }
        Ok(())
    }

    /// Register every leaf key with the store so env-only values are known.
    pub fn bind(&self, store: &mut Store) -> Result<(), ConfigError> {
        self.check()?;
        for path in self.keys() {
            store.bind_env(&path.dotted());
        }
        Ok(())
    }

    /// Write every resolved value into `target`.
    ///
    /// Keys that resolve to nothing are left untouched; the validator reports them.
    pub fn unmarshal(&self, store: &Store, target: &mut T) -> Result<(), ConfigError> {
        for binding in &self.bindings {
            let key = binding.path.dotted();
            if let Some(value) = store.get(&key) {
                binding.assign(target, &value)?;
            }
        }
        Ok(())
    }
}
