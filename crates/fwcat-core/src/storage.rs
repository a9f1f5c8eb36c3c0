//! Reading and writing catalog documents.
//!
//! Output documents are written to a temporary file next to the destination
//! and then renamed over it, so readers never observe a half-written index.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, Result};

/// Render a document as pretty-printed JSON with a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Atomically write `value` as pretty JSON to `path`, creating parent
/// directories as needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_pretty_json(value)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        Error::Storage(format!("Failed to create {}: {e}", parent.display()))
    })?;

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| Error::Storage(format!("Failed to create temp file: {e}")))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", path.display())))?;

    // The temp file is removed on drop if persisting fails.
    tmp.persist(path)
        .map_err(|e| Error::Storage(format!("Failed to commit {}: {}", path.display(), e.error)))?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Read and deserialize a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn writes_pretty_json_with_newline() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        write_json_atomic(&path, &json!({"format_version": 1}))?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(content, "{\n  \"format_version\": 1\n}\n");
        Ok(())
    }

    #[test]
    fn creates_missing_parent_directories() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Firmware").join("nested").join("index.json");
        write_json_atomic(&path, &json!({}))?;
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn overwrites_and_leaves_no_temp_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        write_json_atomic(&path, &json!({"v": 1}))?;
        write_json_atomic(&path, &json!({"v": 2}))?;

        let doc: Value = read_json(&path)?;
        assert_eq!(doc["v"], json!(2));

        let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn read_json_reports_invalid_documents() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        fs::write(&path, "not json")?;

        let err = read_json::<Value>(&path).unwrap_err();
        assert_eq!(err.category(), "serialization");

        let missing = read_json::<Value>(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.category(), "io");
        Ok(())
    }
}
