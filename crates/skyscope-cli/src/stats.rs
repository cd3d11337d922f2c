//! # Stats Subcommand
//!
//! Loads a data directory the way the API server does and prints the
//! statistics one tier would see for one dataset.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use skyscope_core::Tier;
use skyscope_dataset::{Catalog, DatasetKind, Datasets};
use skyscope_policy::PolicyTable;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Directory holding airlines.dat, airports.dat and routes.dat.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// airlines, airports or routes.
    #[arg(long)]
    pub dataset: String,

    /// Tier to evaluate as.
    #[arg(long, default_value = "free")]
    pub tier: String,

    /// YAML policy table; the standard table when omitted.
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

/// Statistics for `kind` at `tier`, keyed as the API renders them.
pub fn dataset_statistics(catalog: &Catalog, kind: DatasetKind, tier: Tier) -> Result<serde_json::Value> {
    let stats = match kind {
        DatasetKind::Airlines => catalog.airlines.statistics(tier)?,
        DatasetKind::Airports => catalog.airports.statistics(tier)?,
        DatasetKind::Routes => catalog.routes.statistics(tier)?,
    };
    Ok(serde_json::to_value(stats.labelled(kind))?)
}

pub fn load_catalog(data_dir: &Path, policy: Option<&Path>) -> Result<Catalog> {
    let policies = match policy {
        Some(path) => PolicyTable::load(path)
            .with_context(|| format!("failed to load policy table: {}", path.display()))?,
        None => PolicyTable::standard(),
    };
    let datasets = Datasets::load_dir(data_dir)
        .with_context(|| format!("failed to load datasets from {}", data_dir.display()))?;
    Ok(Catalog::new(datasets, Arc::new(policies)))
}

pub fn run_stats(args: &StatsArgs) -> Result<u8> {
    let kind: DatasetKind = args.dataset.parse()?;
    let tier: Tier = args.tier.trim().parse()?;
    let catalog = load_catalog(&args.data_dir, args.policy.as_deref())?;
    let stats = dataset_statistics(&catalog, kind, tier)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(0)
}
