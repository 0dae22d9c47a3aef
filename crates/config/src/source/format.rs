//! Config file discovery and parsing.
//!
//! Responsibilities:
//! - Locate `<dir>/<name>.<ext>` for the supported extensions, in a fixed order.
//! - Parse JSON, TOML, YAML and dotenv files into one tree representation.
//! - Normalize the tree: lower-case every table key, treat empty files as empty tables.
//!
//! Does NOT handle:
//! - Environment overrides or key registration (see store.rs).
//!
//! Invariants:
//! - The first matching extension wins; later candidates are never read.
//! - The returned tree is always a table at the top level.
//! - Dotenv parse errors never include raw line contents.
//! - Dotenv values are read literally; `$VAR` is never expanded.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::key::KeyPath;
use crate::loader::ConfigError;

/// A configuration file format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Yaml,
    Dotenv,
}

/// Extensions probed when searching for a config file, in priority order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml", "env"];

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "env" => Some(FileFormat::Dotenv),
            _ => None,
        }
    }

    /// Parse `content` into a normalized table.
    pub fn parse(self, content: &str) -> Result<Map<String, Value>, String> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let tree = match self {
            FileFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string())?,
            FileFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())?,
            FileFormat::Toml => toml::from_str::<toml::Table>(content)
                .map(|table| toml_to_json(toml::Value::Table(table)))
                .map_err(|e| e.to_string())?,
            FileFormat::Dotenv => parse_dotenv(content)?,
        };

        match normalize(tree) {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(format!(
                "top-level value must be a table, found {}",
                type_name(&other)
            )),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Json => "json",
            FileFormat::Toml => "toml",
            FileFormat::Yaml => "yaml",
            FileFormat::Dotenv => "dotenv",
        };
        f.write_str(name)
    }
}

/// Find the config file named `name` in `dir`.
pub fn locate(dir: &Path, name: &str) -> Result<(PathBuf, FileFormat), ConfigError> {
    for ext in SUPPORTED_EXTENSIONS {
        let candidate = dir.join(format!("{name}.{ext}"));
        tracing::debug!(path = %candidate.display(), "Probing config file");
        if candidate.is_file() {
            // SUPPORTED_EXTENSIONS only lists known formats.
            if let Some(format) = FileFormat::from_extension(ext) {
                return Ok((candidate, format));
            }
        }
    }

    Err(ConfigError::NotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Read and parse the file at `path`.
pub fn read_tree(path: &Path, format: FileFormat) -> Result<Map<String, Value>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    format
        .parse(&content)
        .map_err(|message| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message,
        })
}

/// Insert `value` at `key` inside `map`, creating intermediate tables.
///
/// A non-table value sitting on an intermediate segment is replaced.
pub fn insert_path(map: &mut Map<String, Value>, key: &KeyPath, value: Value) {
    let Some((last, parents)) = key.segments().split_last() else {
        return;
    };

    let mut current = map;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(inner) => inner,
            _ => return,
        };
    }
    current.insert(last.clone(), value);
}

/// Collect the dotted paths of every leaf in `map`.
///
/// Arrays and nulls are leaves; empty tables contribute nothing.
pub fn leaf_keys(map: &Map<String, Value>) -> Vec<String> {
    fn walk(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                Value::Object(inner) => walk(inner, &path, out),
                _ => out.push(path),
            }
        }
    }

    let mut out = Vec::new();
    walk(map, "", &mut out);
    out
}

fn parse_dotenv(content: &str) -> Result<Value, String> {
    let literal = escape_substitutions(content);
    let mut map = Map::new();
    for item in dotenvy::from_read_iter(literal.as_bytes()) {
        match item {
            Ok((key, value)) => insert_path(&mut map, &KeyPath::parse(&key), Value::String(value)),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                return Err(format!("invalid dotenv syntax at position {idx}"));
            }
            Err(dotenvy::Error::Io(e)) => return Err(format!("dotenv read failed: {}", e.kind())),
            Err(_) => return Err("invalid dotenv content".to_string()),
        }
    }
    Ok(Value::Object(map))
}

/// Escape every `$` that dotenvy would expand, so values are read literally.
///
/// Substitution reads the process environment, which must only be consulted
/// through the store's `EnvSource`. Single-quoted text and comments are copied
/// unchanged; an already escaped `\$` stays as it is.
fn escape_substitutions(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut single = false;
    let mut double = false;
    let mut escaped = false;
    let mut comment = false;
    let mut prev = '\n';

    for c in content.chars() {
        if comment {
            comment = c != '\n';
        } else if escaped {
            escaped = false;
        } else if single {
            single = c != '\'';
        } else {
            match c {
                '\\' => escaped = true,
                '$' => out.push('\\'),
                '"' => double = !double,
                '\'' if !double => single = true,
                '#' if !double && prev.is_whitespace() => comment = true,
                _ => {}
            }
        }
        out.push(c);
        prev = c;
    }
    out
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), normalize(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}
