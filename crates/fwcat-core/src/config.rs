//! Configuration for manifest and index generation.
//!
//! Every setting has a built-in default, so a config file is optional. When
//! one is given it is TOML and may set any subset of keys:
//!
//! ```toml
//! fetch_timeout_secs = 10
//! index_description = "ArduPilot Firmware Release Index"
//! artifact_extension = "apj"
//! ```
//!
//! Environment variables are applied on top of the file:
//!
//! - `FWCAT_FETCH_TIMEOUT_SECS`
//! - `FWCAT_INDEX_DESCRIPTION`

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::DEFAULT_INDEX_DESCRIPTION;
use crate::{Error, Result};

/// Extension of firmware artifact files, without the dot.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "px4";

/// Upper bound on fetching a prior index.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Environment override for [`CatalogConfig::fetch_timeout_secs`].
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FWCAT_FETCH_TIMEOUT_SECS";

/// Environment override for [`CatalogConfig::index_description`].
pub const ENV_INDEX_DESCRIPTION: &str = "FWCAT_INDEX_DESCRIPTION";

/// Settings shared by both pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Seconds to wait for the remote index before treating it as absent.
    pub fetch_timeout_secs: u64,
    /// `description` of a newly created index.
    pub index_description: String,
    /// Extension that marks a file as a firmware artifact.
    pub artifact_extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            index_description: DEFAULT_INDEX_DESCRIPTION.to_string(),
            artifact_extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Invalid config {}: {e}", path.display()))
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides looked up through `lookup` (normally the process
    /// environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            self.fetch_timeout_secs = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{ENV_FETCH_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        if let Some(description) = lookup(ENV_INDEX_DESCRIPTION) {
            self.index_description = description;
        }
        self.validate()?;
        Ok(self)
    }

    /// Timeout for the remote index fetch.
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.artifact_extension.is_empty() || self.artifact_extension.starts_with('.') {
            return Err(Error::Config(format!(
                "artifact_extension must be a bare extension like \"{DEFAULT_ARTIFACT_EXTENSION}\", got '{}'",
                self.artifact_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_match_release_tooling() {
        let config = CatalogConfig::default();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.index_description, "PX4 Firmware Release Index");
        assert_eq!(config.artifact_extension, "px4");
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fwcat.toml");
        fs::write(&path, "fetch_timeout_secs = 5\n")?;

        let config = CatalogConfig::from_file(&path)?.with_overrides(no_env)?;
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.artifact_extension, "px4");
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fwcat.toml");
        fs::write(&path, "fetch_timeout = 5\n")?;

        let err = CatalogConfig::from_file(&path).unwrap_err();
        assert_eq!(err.category(), "config");
        Ok(())
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = CatalogConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_FETCH_TIMEOUT_SECS, "7"),
            (ENV_INDEX_DESCRIPTION, "Custom Index"),
        ]);
        let config = CatalogConfig::default()
            .with_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.fetch_timeout_secs, 7);
        assert_eq!(config.index_description, "Custom Index");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = CatalogConfig::default()
            .with_overrides(|key| (key == ENV_FETCH_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_FETCH_TIMEOUT_SECS));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = CatalogConfig::default()
            .with_overrides(|key| (key == ENV_FETCH_TIMEOUT_SECS).then(|| "0".to_string()))
            .unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let config = CatalogConfig {
            artifact_extension: ".px4".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.with_overrides(no_env).is_err());
    }
}
