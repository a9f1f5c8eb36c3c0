//! Firmware index maintenance.
//!
//! The index lists every published release newest-first and carries one
//! `latest_*` pointer per channel. It is updated one release at a time with
//! [`FirmwareIndex::upsert`], which replaces any entry with the same version
//! and then re-derives the ordering and pointers from scratch. Applying the
//! same release twice therefore gives the same document as applying it once.

use serde_json::Map;
use tracing::debug;

use crate::channel::Channel;
use crate::clock::Clock;
use crate::types::{FORMAT_VERSION, FirmwareIndex, ReleaseIndexEntry};
use crate::version::newest_first;

/// Inputs describing one published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release version, e.g. `v1.15.0` or `v1.16.0-beta1`.
    pub version: String,
    /// Git tag the release was built from.
    pub git_tag: String,
    /// Number of builds in the release manifest.
    pub build_count: u64,
    /// Primary location of the release manifest.
    pub manifest_url: String,
    /// Optional mirror of the release manifest. Empty counts as absent.
    pub s3_manifest_url: Option<String>,
}

impl ReleaseIndexEntry {
    /// Build an index entry for a release, deriving its channel from the
    /// version and its release date from the clock.
    pub fn new(release: ReleaseInfo, clock: &dyn Clock) -> Self {
        let channel = Channel::classify(&release.version);
        Self {
            release_date: clock.local_date().format("%Y-%m-%d").to_string(),
            channel: Some(channel),
            version: release.version,
            git_tag: release.git_tag,
            build_count: release.build_count,
            manifest_url: release.manifest_url,
            s3_manifest_url: release.s3_manifest_url.filter(|url| !url.is_empty()),
            extra: Map::new(),
        }
    }
}

impl FirmwareIndex {
    /// A new index with no releases.
    pub fn empty(description: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            updated_at: clock.unix_timestamp(),
            description: Some(description.into()),
            releases: Vec::new(),
            latest_stable: None,
            latest_beta: None,
            latest_dev: None,
            extra: Map::new(),
        }
    }

    /// Insert `entry`, replacing any existing release with the same version.
    ///
    /// Afterwards `releases` is sorted newest-first, every `latest_*` pointer
    /// is recomputed from the current releases, and `updated_at` is the clock
    /// time.
    pub fn upsert(&mut self, entry: ReleaseIndexEntry, clock: &dyn Clock) {
        let before = self.releases.len();
        self.releases.retain(|r| r.version != entry.version);
        if self.releases.len() < before {
            debug!("Replacing existing release {}", entry.version);
        }

        self.releases.push(entry);
        self.sort_releases();
        self.recompute_latest();
        self.updated_at = clock.unix_timestamp();
    }

    /// Sort releases newest-first. Equal keys keep their current order.
    pub fn sort_releases(&mut self) {
        self.releases
            .sort_by(|a, b| newest_first(&a.version, &b.version));
    }

    /// Point each tracked channel at its newest release, clearing pointers
    /// for channels that no longer have any.
    pub fn recompute_latest(&mut self) {
        for channel in Channel::TRACKED {
            let newest = self
                .releases
                .iter()
                .find(|r| r.channel.as_ref() == Some(&channel))
                .map(|r| r.version.clone());
            if let Some(slot) = self.latest_slot(&channel) {
                *slot = newest;
            }
        }
    }

    /// Look up a release by exact version string.
    pub fn release(&self, version: &str) -> Option<&ReleaseIndexEntry> {
        self.releases.iter().find(|r| r.version == version)
    }
}
