//! Manifest command implementation

use anyhow::{Context, Result};
use fwcat_core::{CatalogConfig, ManifestBuilder, SystemClock, to_pretty_json, write_json_atomic};
use std::io::Write;
use tracing::info;

use crate::cli::ManifestArgs;

/// Scan the artifact directory and write the release manifest to `--out`,
/// or print it to stdout.
pub fn execute(args: &ManifestArgs, config: &CatalogConfig) -> Result<()> {
    let manifest = ManifestBuilder::new()
        .version(&args.version)
        .git_tag(&args.git_tag)
        .base_url(&args.base_url)
        .extension(&config.artifact_extension)
        .build(&args.dir, &SystemClock)?;

    if let Some(out) = &args.out {
        write_json_atomic(out, &manifest)
            .with_context(|| format!("Failed to write manifest to {}", out.display()))?;
        info!(
            "Generated release manifest: {} ({} builds)",
            out.display(),
            manifest.build_count
        );
    } else {
        let json = to_pretty_json(&manifest)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
    }

    Ok(())
}
