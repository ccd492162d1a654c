use anyhow::{Context, Result};
use std::path::PathBuf;

use gcpeak::store::{MemoryStore, Store};

use super::config::Config;

/// Display what a store snapshot holds
pub fn run(config: Option<PathBuf>, store: Option<PathBuf>) -> Result<()> {
    let config = Config::discover(config.as_deref())?;
    let store_path = config.store_path(store);

    if !store_path.exists() {
        anyhow::bail!("Store does not exist: {}", store_path.display());
    }

    let store = MemoryStore::load(&store_path).context("Failed to read store")?;

    println!("gcpeak Store Information");
    println!("========================");
    println!("File: {}", store_path.display());
    println!();
    println!("{}", store.summary());

    let data = store.data();
    if let (Some(first), Some(last)) = (data.first(), data.last()) {
        println!();
        println!("Data range:");
        println!("  First run: {}", first.run().date_start());
        println!("  Last run:  {}", last.run().date_start());
    }

    let calibrations = store.calibrations();
    if !calibrations.is_empty() {
        println!();
        println!("Calibrations:");
        for crf in &calibrations {
            println!("  {} ({} compounds)", crf, crf.compounds.len());
        }
    }

    Ok(())
}
