//! Conversion of resolved values into typed record fields.
//!
//! Environment overrides always arrive as strings, so conversions are weakly
//! typed: a numeric field accepts `5432` as well as `"5432"`.
//!
//! Invariants:
//! - Conversions never panic; failures are returned as human-readable messages
//!   that the binder wraps with the key name.
//! - Integer conversions reject fractional and out-of-range input.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use crate::source::format::type_name;

/// A type that can be built from a resolved configuration value.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &Value) -> Result<Self, String>;
}

impl FromConfigValue for Value {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(expected("a string", other)),
        }
    }
}

impl FromConfigValue for PathBuf {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        String::from_config_value(value).map(PathBuf::from)
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(i != 0),
                None => Err(format!("cannot read {n} as a boolean")),
            },
            Value::String(s) => parse_bool(s.trim()),
            other => Err(expected("a boolean", other)),
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("cannot read \"{s}\" as a boolean")),
    }
}

macro_rules! impl_from_config_value_int {
    ($($t:ty),*) => {
        $(
            impl FromConfigValue for $t {
                fn from_config_value(value: &Value) -> Result<Self, String> {
                    match value {
                        Value::Number(n) => {
                            if let Some(i) = n.as_i64() {
                                <$t>::try_from(i).map_err(|_| out_of_range(n, stringify!($t)))
                            } else if let Some(u) = n.as_u64() {
                                <$t>::try_from(u).map_err(|_| out_of_range(n, stringify!($t)))
                            } else {
                                Err(format!("{n} is not an integer"))
                            }
                        }
                        Value::String(s) => s
                            .trim()
                            .parse::<$t>()
                            .map_err(|e| format!("cannot read \"{s}\" as {}: {e}", stringify!($t))),
                        Value::Bool(b) => Ok(<$t>::from(*b)),
                        other => Err(expected("an integer", other)),
                    }
                }
            }
        )*
    };
}

impl_from_config_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_config_value_float {
    ($($t:ty),*) => {
        $(
            impl FromConfigValue for $t {
                fn from_config_value(value: &Value) -> Result<Self, String> {
                    match value {
                        Value::Number(n) => n
                            .as_f64()
                            .map(|f| f as $t)
                            .ok_or_else(|| format!("{n} is not a float")),
                        Value::String(s) => s
                            .trim()
                            .parse::<$t>()
                            .map_err(|e| format!("cannot read \"{s}\" as {}: {e}", stringify!($t))),
                        other => Err(expected("a number", other)),
                    }
                }
            }
        )*
    };
}

impl_from_config_value_float!(f32, f64);

impl FromConfigValue for Duration {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| format!("{n} is not a valid number of seconds"))
                .and_then(seconds),
            Value::String(s) => parse_duration(s.trim()),
            other => Err(expected("a duration", other)),
        }
    }
}

/// Parse durations like `90`, `1.5s`, `250ms` or `1h30m`.
///
/// Bare numbers are seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = input.parse::<f64>() {
        return seconds(secs).map_err(|e| format!("invalid duration \"{input}\": {e}"));
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration \"{input}\""))?;
        if number_len == 0 {
            return Err(format!("invalid duration \"{input}\""));
        }
        let (number, tail) = rest.split_at(number_len);
        let amount: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration \"{input}\""))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let unit_nanos = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(format!("unknown unit \"{unit}\" in duration \"{input}\"")),
        };
        let nanos = (amount * unit_nanos).round();
        if nanos >= u64::MAX as f64 {
            return Err(format!("duration \"{input}\" is too large"));
        }
        total = total
            .checked_add(Duration::from_nanos(nanos as u64))
            .ok_or_else(|| format!("duration \"{input}\" is too large"))?;
        rest = next;
    }
    Ok(total)
}

/// Convert a count of seconds, rejecting negative, non-finite and overflowing input.
fn seconds(secs: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{secs} seconds: {e}"))
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_config_value(other).map(Some),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_config_value(item).map_err(|e| format!("item {i}: {e}")))
                .collect(),
            Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
            Value::String(s) => s
                .split(',')
                .enumerate()
                .map(|(i, part)| {
                    T::from_config_value(&Value::String(part.trim().to_string()))
                        .map_err(|e| format!("item {i}: {e}"))
                })
                .collect(),
            other => Err(expected("a list", other)),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for HashMap<String, T> {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        table_entries(value)
    }
}

impl<T: FromConfigValue> FromConfigValue for BTreeMap<String, T> {
    fn from_config_value(value: &Value) -> Result<Self, String> {
        table_entries(value)
    }
}

fn table_entries<T, C>(value: &Value) -> Result<C, String>
where
    T: FromConfigValue,
    C: FromIterator<(String, T)>,
{
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                T::from_config_value(v)
                    .map(|t| (k.clone(), t))
                    .map_err(|e| format!("entry {k}: {e}"))
            })
            .collect(),
        other => Err(expected("a table", other)),
    }
}

fn expected(what: &str, found: &Value) -> String {
    format!("expected {what}, found {}", type_name(found))
}

fn out_of_range(n: &serde_json::Number, target: &str) -> String {
    format!("{n} is out of range for {target}")
}
