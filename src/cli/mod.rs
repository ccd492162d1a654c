use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod info;
mod process;
mod series;

/// gcpeak - NMHC run reconciliation and calibration
#[derive(Parser)]
#[command(name = "gcpeak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Accepts `2019-01-20T12:00:00` or `2019-01-20 12:00:00`
fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("invalid date '{}': {}", value, e))
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest new raw data, create runs and integrate them
    Process {
        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Store snapshot path
        #[arg(short, long, value_name = "FILE")]
        store: Option<PathBuf>,

        /// Directory of VI log files
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,

        /// PeakSimple PA log
        #[arg(long, value_name = "FILE")]
        pa_log: Option<PathBuf>,

        /// Tab-separated CRF table
        #[arg(long, value_name = "FILE")]
        crf_file: Option<PathBuf>,

        /// Matching tolerance in minutes (exclusive)
        #[arg(short, long)]
        tolerance_minutes: Option<i64>,

        /// Do not shift records inside the known clock fault windows
        #[arg(long)]
        no_clock_correction: bool,
    },

    /// Display what a store snapshot holds
    Info {
        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Store snapshot path
        #[arg(short, long, value_name = "FILE")]
        store: Option<PathBuf>,
    },

    /// Export a compound's mixing ratios as CSV
    Series {
        /// Compound name (e.g. ethane, "m&p xylene")
        #[arg(value_name = "COMPOUND")]
        compound: String,

        /// Export the ratio of COMPOUND to this compound instead
        #[arg(long, value_name = "COMPOUND")]
        ratio_to: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Store snapshot path
        #[arg(short, long, value_name = "FILE")]
        store: Option<PathBuf>,

        /// Only runs after this date (inclusive when --end is given too)
        #[arg(long, value_parser = parse_datetime)]
        start: Option<NaiveDateTime>,

        /// Only runs before this date (inclusive when --start is given too)
        #[arg(long, value_parser = parse_datetime)]
        end: Option<NaiveDateTime>,

        /// Output CSV path (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            config,
            store,
            log_dir,
            pa_log,
            crf_file,
            tolerance_minutes,
            no_clock_correction,
        } => process::run(
            config,
            store,
            log_dir,
            pa_log,
            crf_file,
            tolerance_minutes,
            no_clock_correction,
        ),
        Commands::Info { config, store } => info::run(config, store),
        Commands::Series {
            compound,
            ratio_to,
            config,
            store,
            start,
            end,
            output,
        } => series::run(compound, ratio_to, config, store, start, end, output),
    }
}
