//! Error types for fwcat-core operations.
//!
//! Two error types live here:
//!
//! - [`Error`] covers everything that can stop an operation: file system
//!   access, the remote index fetch, configuration and serialization.
//! - [`ExtractError`] covers a single firmware artifact that could not be
//!   turned into a build entry. The manifest builder logs these and moves on,
//!   so they never abort a batch.
//!
//! ## Error Categories
//!
//! [`Error::category`] returns a short static identifier for structured logs:
//!
//! ```rust
//! use fwcat_core::Error;
//!
//! let err = Error::Config("artifact directory ./out does not exist".to_string());
//! assert_eq!(err.category(), "config");
//! assert!(!err.is_recoverable());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for fwcat-core operations.
///
/// Index sources swallow most of these (an unavailable prior index is not
/// fatal), so in practice only configuration and output errors reach the
/// command line.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// The underlying `std::io::Error` is preserved so the kind can be
    /// inspected (missing file, permission denied, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Covers connection failures and non-success HTTP statuses while
    /// fetching a prior index.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request did not complete within the configured fetch timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The requested remote document does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A document was readable but its content is not what we expect.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON or TOML (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - The artifact directory does not exist or is not a directory
    /// - The config file is missing or is not valid TOML
    /// - An environment override has an invalid value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing an output document failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away if the operation were retried.
    ///
    /// fwcat never retries on its own; this is informational for callers
    /// that wrap the library in their own pipeline.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Parse(_) => "parse",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
        }
    }
}

/// Why a single firmware artifact was left out of a release manifest.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The artifact file could not be read.
    #[error("Error reading {}: {source}", .path.display())]
    Read {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The artifact is not valid JSON.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },

    /// One of the discriminator keys (`magic`, `board_id`, `image`) is absent.
    #[error("{} missing required fields ({}), skipping", .path.display(), .missing.join(", "))]
    MissingFields {
        /// Path of the artifact.
        path: PathBuf,
        /// The required keys that were not found.
        missing: Vec<&'static str>,
    },
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
