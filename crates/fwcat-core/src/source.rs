//! Where a previously published index comes from.
//!
//! An update starts from the first source in a fixed precedence list that
//! yields a usable document: an explicit local file, then a remote URL, and
//! finally a fresh empty index. A source that is missing, unreachable or holds
//! invalid JSON is skipped with a log line rather than failing the update.
//! Valid JSON with odd field values still loads; see [`crate::types`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::fetcher::Fetcher;
use crate::types::FirmwareIndex;
use crate::{Error, Result};

/// A provider of an optional prior index.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Human-readable location, used in log messages.
    fn location(&self) -> String;

    /// Load the index, or `None` when this source has nothing usable.
    async fn load(&self) -> Option<FirmwareIndex>;
}

/// Parse an index document.
///
/// `Ok(None)` means the document is an empty JSON object, which carries no
/// releases and is treated the same as no document at all.
pub fn parse_index(content: &str) -> Result<Option<FirmwareIndex>> {
    let value: Value = serde_json::from_str(content)?;
    match &value {
        Value::Object(obj) if obj.is_empty() => Ok(None),
        Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
        other => Err(Error::Parse(format!(
            "expected a JSON object, found {}",
            json_kind(other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An index stored on the local file system.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IndexSource for LocalFileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Option<FirmwareIndex> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No existing index at {}", self.path.display());
                return None;
            },
            Err(e) => {
                warn!("Could not read existing index file {}: {}", self.path.display(), e);
                return None;
            },
        };

        match parse_index(&content) {
            Ok(index) => index,
            Err(e) => {
                warn!("Invalid JSON in existing index file {}: {}", self.path.display(), e);
                None
            },
        }
    }
}

/// An index published at an HTTP(S) URL.
pub struct RemoteSource {
    url: String,
    fetcher: Fetcher,
}

impl RemoteSource {
    /// Source fetching `url` with `fetcher`.
    pub fn new(url: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }
}

#[async_trait]
impl IndexSource for RemoteSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Option<FirmwareIndex> {
        let content = match self.fetcher.fetch_text(&self.url).await {
            Ok(content) => content,
            Err(e) => {
                info!("Could not fetch existing index from {}: {}", self.url, e);
                return None;
            },
        };

        match parse_index(&content) {
            Ok(index) => index,
            Err(e) => {
                warn!("Invalid JSON in existing index from {}: {}", self.url, e);
                None
            },
        }
    }
}

/// Return the index from the first source that has one.
pub async fn resolve_index(sources: &[Box<dyn IndexSource>]) -> Option<FirmwareIndex> {
    for source in sources {
        if let Some(index) = source.load().await {
            info!(
                "Loaded existing index from {} ({} releases)",
                source.location(),
                index.releases.len()
            );
            return Some(index);
        }
    }
    None
}

/// [`resolve_index`], falling back to a new empty index.
pub async fn load_or_create(
    sources: &[Box<dyn IndexSource>],
    description: &str,
    clock: &dyn Clock,
) -> FirmwareIndex {
    match resolve_index(sources).await {
        Some(index) => index,
        None => {
            info!("Creating new firmware index");
            FirmwareIndex::empty(description, clock)
        },
    }
}
