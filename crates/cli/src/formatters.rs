//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render resolved key rows as a padded table or pretty-printed JSON.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - Rows are rendered in the order given; callers pass them sorted by key.
//! - Unset values render as `-` in tables and `null` in JSON.

use anyhow::Result;
use confbind::ValueSource;
use serde::Serialize;
use serde_json::Value;

use crate::args::OutputFormat;

/// One known key and how it resolved.
#[derive(Debug, Clone, Serialize)]
pub struct KeyRow {
    pub key: String,
    pub env: String,
    pub source: Option<ValueSource>,
    pub value: Option<Value>,
}

/// Outcome of a completeness check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub file: Option<String>,
    pub keys: usize,
}

/// Formatter trait for the supported output types.
pub trait Formatter {
    /// Format the resolved key listing.
    fn format_keys(&self, rows: &[KeyRow]) -> Result<String>;

    /// Format a successful completeness check.
    fn format_check(&self, output: &CheckOutput) -> Result<String>;
}

/// Padded, whitespace-aligned table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_keys(&self, rows: &[KeyRow]) -> Result<String> {
        if rows.is_empty() {
            return Ok("No keys found.".to_string());
        }

        let key_width = column_width("Key", rows.iter().map(|r| r.key.len()));
        let env_width = column_width("Env", rows.iter().map(|r| r.env.len()));

        let mut output = format!(
            "{:<key_width$} {:<env_width$} {:<8} {}\n",
            "Key", "Env", "Source", "Value"
        );
        output.push_str(&format!(
            "{}\n",
            "-".repeat(key_width + env_width + 16)
        ));

        for row in rows {
            let source = row
                .source
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            let value = row.value.as_ref().map_or_else(|| "-".to_string(), display_value);
            output.push_str(&format!(
                "{:<key_width$} {:<env_width$} {:<8} {}\n",
                row.key, row.env, source, value
            ));
        }

        Ok(output)
    }

    fn format_check(&self, output: &CheckOutput) -> Result<String> {
        let file = output.file.as_deref().unwrap_or("(no file)");
        Ok(format!("ok: {} keys resolved from {}", output.keys, file))
    }
}

/// Pretty-printed JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_keys(&self, rows: &[KeyRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn format_check(&self, output: &CheckOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

fn column_width(header: &str, lengths: impl Iterator<Item = usize>) -> usize {
    lengths.fold(header.len(), usize::max)
}

/// Strings print bare; everything else prints as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<KeyRow> {
        vec![
            KeyRow {
                key: "db.port".to_string(),
                env: "DB_PORT".to_string(),
                source: Some(ValueSource::Env),
                value: Some(json!("5432")),
            },
            KeyRow {
                key: "host".to_string(),
                env: "HOST".to_string(),
                source: None,
                value: None,
            },
        ]
    }

    #[test]
    fn test_table_lists_rows_with_placeholders() {
        let output = TableFormatter.format_keys(&rows()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("Key"));
        assert!(lines[2].contains("DB_PORT"));
        assert!(lines[2].contains("env"));
        assert!(lines[2].ends_with("5432"));
        assert!(lines[3].starts_with("host"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(TableFormatter.format_keys(&[]).unwrap(), "No keys found.");
    }

    #[test]
    fn test_json_keys_shape() {
        let output = JsonFormatter.format_keys(&rows()).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed[0]["env"], "DB_PORT");
        assert_eq!(parsed[0]["source"], "env");
        assert_eq!(parsed[1]["source"], Value::Null);
        assert_eq!(parsed[1]["value"], Value::Null);
    }

    #[test]
    fn test_display_value_non_string() {
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
        assert_eq!(display_value(&json!("a b")), "a b");
    }
}
