//! fwcat CLI - firmware release manifests and index
//!
//! `fwcat manifest` describes the artifacts of one release; `fwcat index`
//! records that release in the index polled by ground stations.

use anyhow::{Context, Result};
use clap::Parser;
use fwcat_core::CatalogConfig;

mod cli;
mod commands;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = CatalogConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Commands::Manifest(args) => commands::generate_manifest(args, &config)?,
        Commands::Index(args) => commands::update_index(args, &config).await?,
    }

    Ok(())
}
