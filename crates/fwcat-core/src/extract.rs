//! Metadata extraction from firmware artifacts.
//!
//! A `.px4` artifact is a JSON document holding board metadata next to a
//! compressed firmware `image`. Boards use different `magic` strings
//! (`PX4FWv1`, `PX4FWv2`, `ARKFWv1`, ...), so only the presence of the
//! discriminator keys is checked, never their values.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ExtractError;
use crate::types::{BuildEntry, DEFAULT_MAV_AUTOPILOT};

/// Keys every firmware artifact must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["magic", "board_id", "image"];

/// Read a firmware artifact from disk and extract its build entry.
pub fn extract_build_entry(path: &Path) -> Result<BuildEntry, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value =
        serde_json::from_str(&content).map_err(|source| ExtractError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    build_entry_from_document(&filename, &document).ok_or_else(|| {
        ExtractError::MissingFields {
            path: path.to_path_buf(),
            missing: missing_fields(&document),
        }
    })
}

/// Project the allow-listed metadata out of an already parsed artifact.
///
/// Returns `None` when any of [`REQUIRED_FIELDS`] is absent. The firmware
/// `image` itself is never copied.
pub fn build_entry_from_document(filename: &str, document: &Value) -> Option<BuildEntry> {
    let obj = document.as_object()?;
    if REQUIRED_FIELDS.iter().any(|key| !obj.contains_key(*key)) {
        return None;
    }

    let manifest = obj.get("manifest").filter(|m| is_truthy(m)).cloned();

    Some(BuildEntry {
        filename: filename.to_string(),
        board_id: uint_field(obj, "board_id", 0),
        board_revision: uint_field(obj, "board_revision", 0),
        version: str_field(obj, "version"),
        git_identity: str_field(obj, "git_identity"),
        git_hash: str_field(obj, "git_hash"),
        build_time: int_field(obj, "build_time", 0),
        image_size: uint_field(obj, "image_size", 0),
        sha256sum: str_field(obj, "sha256sum"),
        mav_autopilot: u32::try_from(uint_field(
            obj,
            "mav_autopilot",
            u64::from(DEFAULT_MAV_AUTOPILOT),
        ))
        .unwrap_or(DEFAULT_MAV_AUTOPILOT),
        manifest,
        url: None,
    })
}

fn missing_fields(document: &Value) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|key| document.get(key).is_none())
        .collect()
}

/// An empty board manifest (`{}`, `null`, `""`, ...) is left out entirely.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            debug!("Ignoring non-string '{}' value {}", key, other);
            String::new()
        },
    }
}

fn uint_field(obj: &Map<String, Value>, key: &str, default: u64) -> u64 {
    match obj.get(key) {
        None => default,
        Some(value) => value.as_u64().unwrap_or_else(|| {
            debug!("Ignoring non-integer '{}' value {}", key, value);
            default
        }),
    }
}

fn int_field(obj: &Map<String, Value>, key: &str, default: i64) -> i64 {
    match obj.get(key) {
        None => default,
        Some(value) => value.as_i64().unwrap_or_else(|| {
            debug!("Ignoring non-integer '{}' value {}", key, value);
            default
        }),
    }
}
