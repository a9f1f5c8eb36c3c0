//! Release manifest generation.
//!
//! Scans a directory of firmware artifacts and produces a single
//! [`ReleaseManifest`] listing every build, so that ground stations can
//! discover the available firmware without downloading each file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::DEFAULT_ARTIFACT_EXTENSION;
use crate::extract::extract_build_entry;
use crate::types::{BuildEntry, FORMAT_VERSION, ReleaseManifest};
use crate::{Error, Result};

/// Builds a [`ReleaseManifest`] from a directory of firmware artifacts.
///
/// ```rust,no_run
/// use fwcat_core::{ManifestBuilder, SystemClock};
/// use std::path::Path;
///
/// let manifest = ManifestBuilder::new()
///     .version("v1.15.0")
///     .git_tag("v1.15.0")
///     .base_url("https://github.com/PX4/PX4-Autopilot/releases/download/v1.15.0")
///     .build(Path::new("./artifacts"), &SystemClock)?;
/// assert_eq!(manifest.build_count, manifest.builds.len());
/// # Ok::<(), fwcat_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    version: String,
    git_tag: String,
    base_url: String,
    extension: String,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self {
            version: String::new(),
            git_tag: String::new(),
            base_url: String::new(),
            extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
        }
    }
}

impl ManifestBuilder {
    /// Builder with empty version, tag and base URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release version recorded in the manifest.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Git tag recorded in the manifest.
    #[must_use]
    pub fn git_tag(mut self, git_tag: impl Into<String>) -> Self {
        self.git_tag = git_tag.into();
        self
    }

    /// Base download URL. When non-empty, every build gets
    /// `url = <base_url>/<filename>`.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// File extension (without the dot) that identifies firmware artifacts.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Scan `artifact_dir` and assemble the manifest.
    ///
    /// Individual artifacts that cannot be read or lack required fields are
    /// logged and skipped. Only a missing directory is an error.
    pub fn build(&self, artifact_dir: &Path, clock: &dyn Clock) -> Result<ReleaseManifest> {
        if !artifact_dir.is_dir() {
            return Err(Error::Config(format!(
                "{} is not a directory",
                artifact_dir.display()
            )));
        }

        let files = self.artifact_files(artifact_dir)?;
        if files.is_empty() {
            warn!(
                "No .{} files found in {}",
                self.extension,
                artifact_dir.display()
            );
        }

        let mut builds = Vec::with_capacity(files.len());
        for path in &files {
            match extract_build_entry(path) {
                Ok(mut entry) => {
                    if !self.base_url.is_empty() {
                        entry.url = Some(download_url(&self.base_url, &entry.filename));
                    }
                    debug!("Added {} (board_id {})", entry.filename, entry.board_id);
                    builds.push(entry);
                },
                Err(e) => warn!("{}", e),
            }
        }

        Ok(self.assemble(builds, clock))
    }

    /// Sort `builds` and wrap them in a manifest stamped with the clock time.
    pub fn assemble(&self, mut builds: Vec<BuildEntry>, clock: &dyn Clock) -> ReleaseManifest {
        // Stable, so equal keys keep directory order.
        builds.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));

        info!("Collected {} firmware builds", builds.len());
        ReleaseManifest {
            format_version: FORMAT_VERSION,
            generated_at: clock.unix_timestamp(),
            version: self.version.clone(),
            git_tag: self.git_tag.clone(),
            build_count: builds.len(),
            builds,
        }
    }

    fn artifact_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if matches_ext && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Join a base URL and a filename with exactly one `/` between them.
pub fn download_url(base_url: &str, filename: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), filename)
}
