//! # fwcat-core
//!
//! Core functionality for fwcat - release cataloguing for autopilot firmware.
//!
//! A firmware release ships one artifact per flight-controller board. This crate
//! turns a directory of those artifacts into a release manifest, and folds each
//! release into a long-lived index that ground stations poll to discover what
//! firmware is available on each release channel.
//!
//! ## Architecture
//!
//! - **Extraction**: Reads the JSON envelope of a `.px4` artifact into a [`BuildEntry`]
//! - **Manifest**: Collects every build of one release into a [`ReleaseManifest`]
//! - **Versions and channels**: Orders version strings and classifies them as
//!   stable, beta or dev
//! - **Index**: Maintains the [`FirmwareIndex`] of all releases, one upsert at a time
//! - **Sources**: Locates the previously published index, locally or over HTTP
//! - **Storage**: Atomic JSON output
//!
//! ## Quick Start
//!
//! ```rust
//! use fwcat_core::{FirmwareIndex, FixedClock, ReleaseIndexEntry, ReleaseInfo};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 7, 1).ok_or("bad date")?;
//! let clock = FixedClock::new(1_751_328_000, date);
//!
//! let mut index = FirmwareIndex::empty("PX4 Firmware Release Index", &clock);
//! let release = ReleaseInfo {
//!     version: "v1.15.0".to_string(),
//!     git_tag: "v1.15.0".to_string(),
//!     build_count: 150,
//!     manifest_url: "https://example.com/v1.15.0/release_manifest.json".to_string(),
//!     s3_manifest_url: None,
//! };
//! index.upsert(ReleaseIndexEntry::new(release, &clock), &clock);
//!
//! assert_eq!(index.latest_stable.as_deref(), Some("v1.15.0"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. Problems with a single
//! artifact are reported as [`ExtractError`] and skipped by the manifest
//! builder; a prior index that cannot be loaded is treated as absent.

/// Release channels and version classification
pub mod channel;
/// Time source for generated timestamps and dates
pub mod clock;
/// Configuration file and environment overrides
pub mod config;
/// Error types and result aliases
pub mod error;
/// Reading build metadata from firmware artifacts
pub mod extract;
/// HTTP fetching of a published index
pub mod fetcher;
/// Firmware index upsert and channel pointers
pub mod index;
mod lenient;
/// Release manifest generation
pub mod manifest;
/// Prior index sources and their precedence
pub mod source;
/// Atomic JSON output
pub mod storage;
/// Manifest and index document types
pub mod types;
/// Version ordering
pub mod version;

// Re-export commonly used types
pub use channel::Channel;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CatalogConfig;
pub use error::{Error, ExtractError, Result};
pub use extract::extract_build_entry;
pub use fetcher::Fetcher;
pub use index::ReleaseInfo;
pub use manifest::ManifestBuilder;
pub use source::{IndexSource, LocalFileSource, RemoteSource, load_or_create, resolve_index};
pub use storage::{read_json, to_pretty_json, write_json_atomic};
pub use types::*;
pub use version::{VersionKey, newest_first};
