//! Integration tests for `confbind keys`.

mod common;

use common::{confbind_cmd, config_dir};
use predicates::prelude::*;

#[test]
fn test_keys_table_lists_file_keys() {
    let dir = config_dir("app.yaml", "host: a\ndb:\n  url: postgres://db\n");

    confbind_cmd()
        .args(["keys", "--name", "app", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("db.url"))
        .stdout(predicate::str::contains("DB_URL"))
        .stdout(predicate::str::contains("postgres://db"))
        .stdout(predicate::str::contains("file"));
}

#[test]
fn test_keys_json_reports_env_and_override_sources() {
    let dir = config_dir("app.toml", "host = \"a\"\nport = 1\n");

    let output = confbind_cmd()
        .args(["keys", "-n", "app", "-o", "json", "--set", "host=b", "-d"])
        .arg(dir.path())
        .env("PORT", "2")
        .output()
        .expect("Failed to run confbind");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["key"], "host");
    assert_eq!(rows[0]["source"], "override");
    assert_eq!(rows[0]["value"], "b");

    assert_eq!(rows[1]["key"], "port");
    assert_eq!(rows[1]["env"], "PORT");
    assert_eq!(rows[1]["source"], "env");
    assert_eq!(rows[1]["value"], "2");
}

#[test]
fn test_keys_shows_required_key_without_value() {
    let dir = config_dir("app.json", r#"{"host": "a"}"#);

    confbind_cmd()
        .args(["keys", "--name", "app", "--require", "timeout", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TIMEOUT"));
}

#[test]
fn test_keys_reads_dir_and_name_from_env() {
    let dir = config_dir("svc.env", "HOST=h\n");

    confbind_cmd()
        .arg("keys")
        .env("CONFBIND_DIR", dir.path())
        .env("CONFBIND_NAME", "svc")
        .assert()
        .success()
        .stdout(predicate::str::contains("host"));
}

#[test]
fn test_keys_missing_file_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();

    confbind_cmd()
        .args(["keys", "--name", "absent", "--dir"])
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent"));
}

#[test]
fn test_keys_unparsable_file_exits_2() {
    let dir = config_dir("app.json", "{not json");

    confbind_cmd()
        .args(["keys", "--name", "app", "--dir"])
        .arg(dir.path())
        .assert()
        .code(2);
}

#[test]
fn test_keys_blank_override_falls_through_to_file() {
    let dir = config_dir("app.yaml", "host: from-file\n");

    let output = confbind_cmd()
        .args(["keys", "-n", "app", "-o", "json", "--set", "host=", "-d"])
        .arg(dir.path())
        .output()
        .expect("Failed to run confbind");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["key"], "host");
    assert_eq!(rows[0]["source"], "file");
    assert_eq!(rows[0]["value"], "from-file");
}
