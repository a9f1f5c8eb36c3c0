//! Index command implementation

use anyhow::{Context, Result};
use fwcat_core::{
    CatalogConfig, Fetcher, IndexSource, LocalFileSource, ReleaseIndexEntry, ReleaseInfo,
    RemoteSource, SystemClock, load_or_create, write_json_atomic,
};
use tracing::info;

use crate::cli::IndexArgs;

/// Load the prior index, upsert this release and write the result to `--out`.
///
/// The prior index comes from `--existing-index` if that file holds a usable
/// index, otherwise from `--fetch-url`, otherwise a new index is started.
pub async fn execute(args: &IndexArgs, config: &CatalogConfig) -> Result<()> {
    let sources = prior_sources(args, config)?;
    let clock = SystemClock;

    let mut index = load_or_create(&sources, &config.index_description, &clock).await;

    let release = ReleaseInfo {
        version: args.version.clone(),
        git_tag: args.git_tag.clone(),
        build_count: args.build_count,
        manifest_url: args.manifest_url.clone(),
        s3_manifest_url: Some(args.s3_manifest_url.clone()),
    };
    index.upsert(ReleaseIndexEntry::new(release, &clock), &clock);

    write_json_atomic(&args.out, &index)
        .with_context(|| format!("Failed to write index to {}", args.out.display()))?;
    info!(
        "Updated firmware index: {} ({} releases)",
        args.out.display(),
        index.releases.len()
    );
    Ok(())
}

fn prior_sources(args: &IndexArgs, config: &CatalogConfig) -> Result<Vec<Box<dyn IndexSource>>> {
    let mut sources: Vec<Box<dyn IndexSource>> = Vec::new();
    if let Some(path) = &args.existing_index {
        sources.push(Box::new(LocalFileSource::new(path)));
    }
    if let Some(url) = args.fetch_url.as_deref().filter(|url| !url.is_empty()) {
        let fetcher = Fetcher::with_timeout(config.fetch_timeout())
            .context("Failed to create HTTP client")?;
        sources.push(Box::new(RemoteSource::new(url, fetcher)));
    }
    Ok(sources)
}
