//! # gcpeak
//!
//! Command-line driver for the NMHC reconciliation engine. Each invocation
//! loads the store snapshot, runs one batch and saves the snapshot again;
//! scheduling is left to cron or a systemd timer.
//!
//! ## Usage
//!
//! ```bash
//! # Run one full cycle with paths from gcpeak.toml
//! gcpeak process --config gcpeak.toml
//!
//! # Show what the store holds
//! gcpeak info --store gcpeak.json
//!
//! # Export a compound's mixing ratios as CSV
//! gcpeak series ethane --start 2019-01-01T00:00:00 -o ethane.csv
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
