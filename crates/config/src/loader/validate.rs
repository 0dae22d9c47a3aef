//! Completeness check run after unmarshal.
//!
//! Every key the store knows about (file leaves, registered record keys,
//! explicit overrides) must resolve to a non-null value.

use std::collections::BTreeSet;

use super::error::ConfigError;
use crate::key::env_name;
use crate::source::Store;

/// Collect the environment names of all unresolved keys, sorted and deduplicated.
///
/// File keys such as `a_b` and `a.b` share one name and are listed once.
pub fn missing_keys(store: &Store) -> Vec<String> {
    let missing: BTreeSet<String> = store
        .all_keys()
        .into_iter()
        .filter(|key| !store.is_set(key))
        .map(|key| env_name(&key))
        .collect();
    missing.into_iter().collect()
}

/// Fail with [`ConfigError::MissingKeys`] if any known key is unresolved.
pub fn check_missing(store: &Store) -> Result<(), ConfigError> {
    let missing = missing_keys(store);
    if missing.is_empty() {
        return Ok(());
    }

    tracing::debug!(missing = %missing.join(","), "Config keys without a value");
    Err(ConfigError::MissingKeys(missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapEnv;
    use serde_json::{Map, json};

    #[test]
    fn test_missing_keys_sorted_in_env_spelling() {
        let mut store = Store::from_tree(Map::new(), MapEnv::new());
        store.bind_env("port");
        store.bind_env("db.host");
        store.bind_env("host");

        assert_eq!(missing_keys(&store), ["DB_HOST", "HOST", "PORT"]);
    }

    #[test]
    fn test_env_satisfies_registered_key() {
        let mut store = Store::from_tree(Map::new(), MapEnv::new().with("HOST", "a"));
        store.bind_env("host");
        assert!(check_missing(&store).is_ok());
    }

    #[test]
    fn test_keys_sharing_env_name_listed_once() {
        let mut map = Map::new();
        map.insert("a_b".to_string(), json!(null));
        map.insert("a".to_string(), json!({"b": null}));
        let store = Store::from_tree(map, MapEnv::new());

        assert_eq!(missing_keys(&store), ["A_B"]);
    }

    #[test]
    fn test_null_file_key_outside_schema_is_reported() {
        let mut map = Map::new();
        map.insert("extra".to_string(), json!(null));
        let store = Store::from_tree(map, MapEnv::new());

        let err = check_missing(&store).unwrap_err();
        assert_eq!(err.to_string(), "missing env: EXTRA");
    }
}
