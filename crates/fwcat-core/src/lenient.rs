//! Tolerant field deserializers for prior index documents.
//!
//! An index may have been written by another tool or edited by hand. A field
//! holding `null` or a value of the wrong JSON type falls back to its default
//! instead of failing the whole document, so one bad entry never costs the
//! release history.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::channel::Channel;
use crate::types::{FORMAT_VERSION, ReleaseIndexEntry};

fn coerced(expected: &str, value: &Value) {
    if !value.is_null() {
        debug!("Ignoring {} where {} was expected", value, expected);
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => {
            coerced("a string", &other);
            None
        },
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn as_u64(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        coerced("a non-negative integer", value);
    }
    parsed
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_i64(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        coerced("an integer", value);
    }
    parsed
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(d)?).unwrap_or_default())
}

pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(as_text(Value::deserialize(d)?))
}

pub fn unsigned<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(as_u64(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn signed<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(as_i64(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn format_version<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(as_u64(&Value::deserialize(d)?)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(FORMAT_VERSION))
}

pub fn channel<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Channel>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(name) => Ok(Some(Channel::from_name(name))),
        other => {
            coerced("a channel name", &other);
            Ok(None)
        },
    }
}

/// Entries that are not JSON objects are dropped with a warning. A
/// `releases` value that is not an array counts as an empty list.
pub fn releases<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ReleaseIndexEntry>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!("Ignoring non-list 'releases' value {}", other);
            Vec::new()
        },
    };

    let mut releases = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            warn!("Dropping malformed release entry {}", item);
            continue;
        }
        match serde_json::from_value(item) {
            Ok(entry) => releases.push(entry),
            Err(e) => warn!("Dropping unreadable release entry: {}", e),
        }
    }
    Ok(releases)
}
