//! CLI argument parsing and command definitions.
//!
//! fwcat has two pipelines, one per subcommand, typically run back to back by
//! a release workflow:
//!
//! ```bash
//! # Describe every artifact of a release
//! fwcat manifest --dir ./artifacts --version v1.15.0 --git-tag v1.15.0 \
//!     --base-url https://github.com/PX4/PX4-Autopilot/releases/download/v1.15.0 \
//!     --out release_manifest.json
//!
//! # Record the release in the long-lived index
//! fwcat index --version v1.15.0 --git-tag v1.15.0 --build-count 150 \
//!     --manifest-url https://github.com/PX4/PX4-Autopilot/releases/download/v1.15.0/release_manifest.json \
//!     --fetch-url https://px4-travis.s3.amazonaws.com/Firmware/index.json \
//!     --out ./index.json
//! ```
//!
//! Logs go to stderr. `-v` enables debug output and `-q` limits it to errors.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for fwcat
#[derive(Parser, Clone, Debug)]
#[command(name = "fwcat")]
#[command(author, version, about = "Firmware release manifests and index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "FWCAT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a release manifest from a directory of firmware artifacts
    Manifest(ManifestArgs),
    /// Add or replace a release in the firmware index
    Index(IndexArgs),
}

/// Arguments for `fwcat manifest`
#[derive(Args, Clone, Debug)]
pub struct ManifestArgs {
    /// Directory containing firmware artifacts
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Output file path (default: stdout)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Release version string (e.g. v1.15.0)
    #[arg(long, default_value = "")]
    pub version: String,

    /// Git tag for this release
    #[arg(long, default_value = "")]
    pub git_tag: String,

    /// Base URL for firmware downloads; each build gets <base-url>/<filename>
    #[arg(long, value_name = "URL", default_value = "")]
    pub base_url: String,
}

/// Arguments for `fwcat index`
#[derive(Args, Clone, Debug)]
pub struct IndexArgs {
    /// Release version (e.g. v1.15.0)
    #[arg(long)]
    pub version: String,

    /// Git tag for this release
    #[arg(long)]
    pub git_tag: String,

    /// Number of firmware builds in this release
    #[arg(long, value_name = "N")]
    pub build_count: u64,

    /// URL of the release manifest
    #[arg(long, value_name = "URL")]
    pub manifest_url: String,

    /// Alternative mirror URL of the release manifest
    #[arg(long, value_name = "URL", default_value = "")]
    pub s3_manifest_url: String,

    /// URL to fetch the existing index from
    #[arg(long, value_name = "URL")]
    pub fetch_url: Option<String>,

    /// Existing local index file to update
    #[arg(long, value_name = "PATH")]
    pub existing_index: Option<PathBuf>,

    /// Output file path for the updated index
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
}
