use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::channel::Channel;
use crate::lenient;

/// Schema version written to both manifest and index documents.
pub const FORMAT_VERSION: u32 = 1;

/// `MAV_AUTOPILOT_PX4`, used when an artifact does not declare one.
pub const DEFAULT_MAV_AUTOPILOT: u32 = 12;

/// Description given to a freshly created index.
pub const DEFAULT_INDEX_DESCRIPTION: &str = "PX4 Firmware Release Index";

const fn default_format_version() -> u32 {
    FORMAT_VERSION
}

/// Metadata for one firmware artifact in a release manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    pub filename: String,
    pub board_id: u64,
    pub board_revision: u64,
    pub version: String,
    pub git_identity: String,
    pub git_hash: String,
    pub build_time: i64,
    pub image_size: u64,
    pub sha256sum: String,
    pub mav_autopilot: u32,
    /// Board-specific manifest, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BuildEntry {
    /// Ordering key inside a manifest: the board manifest's `target` when it
    /// is a string, otherwise the filename.
    pub fn sort_key(&self) -> &str {
        self.manifest
            .as_ref()
            .and_then(|m| m.get("target"))
            .and_then(Value::as_str)
            .unwrap_or(&self.filename)
    }
}

/// Per-release list of firmware builds (`release_manifest.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    pub format_version: u32,
    pub generated_at: i64,
    pub version: String,
    pub git_tag: String,
    /// Always `builds.len()` for manifests produced by [`crate::ManifestBuilder`].
    pub build_count: usize,
    pub builds: Vec<BuildEntry>,
}

/// One release in the firmware index.
///
/// Fields are lenient on input so that an index written by another tool, or
/// edited by hand, still loads: `null` or a mistyped value becomes the
/// field's default. Keys fwcat does not know about are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseIndexEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub git_tag: String,
    /// `YYYY-MM-DD` in the generating machine's timezone.
    #[serde(default, deserialize_with = "lenient::string")]
    pub release_date: String,
    #[serde(
        default,
        deserialize_with = "lenient::channel",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel: Option<Channel>,
    #[serde(default, deserialize_with = "lenient::unsigned")]
    pub build_count: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub manifest_url: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub s3_manifest_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The top-level firmware index (`index.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmwareIndex {
    #[serde(
        default = "default_format_version",
        deserialize_with = "lenient::format_version"
    )]
    pub format_version: u32,
    #[serde(default, deserialize_with = "lenient::signed")]
    pub updated_at: i64,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Newest first, see [`crate::VersionKey`].
    #[serde(default, deserialize_with = "lenient::releases")]
    pub releases: Vec<ReleaseIndexEntry>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_stable: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_beta: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_dev: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FirmwareIndex {
    /// The `latest_*` pointer for a tracked channel. `None` for unknown channels.
    pub fn latest(&self, channel: &Channel) -> Option<&str> {
        match channel {
            Channel::Stable => self.latest_stable.as_deref(),
            Channel::Beta => self.latest_beta.as_deref(),
            Channel::Dev => self.latest_dev.as_deref(),
            Channel::Unknown(_) => None,
        }
    }

    pub(crate) fn latest_slot(&mut self, channel: &Channel) -> Option<&mut Option<String>> {
        match channel {
            Channel::Stable => Some(&mut self.latest_stable),
            Channel::Beta => Some(&mut self.latest_beta),
            Channel::Dev => Some(&mut self.latest_dev),
            Channel::Unknown(_) => None,
        }
    }
}
