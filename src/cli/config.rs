//! TOML configuration file support.
//!
//! Paths and matching options can live in a config file instead of being
//! passed on every scheduled invocation:
//!
//! ```toml
//! # gcpeak.toml
//! [paths]
//! store = "gcpeak.json"
//! log_dir = "logs"
//! pa_log = "NMHC_PA.LOG"
//! crf_file = "crfs.txt"
//!
//! [matching]
//! tolerance_minutes = 11
//! correct_clock = true
//! ```
//!
//! Command-line flags override values read here.

use anyhow::{Context, Result};
use chrono::Duration;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use gcpeak::pipeline::PipelineConfig;

/// Config file read when `--config` is not given and it exists
pub const DEFAULT_CONFIG_FILE: &str = "gcpeak.toml";

/// Snapshot path used when neither the config nor the flags name one
pub const DEFAULT_STORE_FILE: &str = "gcpeak.json";

/// Root configuration structure for gcpeak.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Input and store locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Log/line matching settings.
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Locations of the store and the raw instrument outputs.
#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
    /// JSON store snapshot.
    pub store: Option<PathBuf>,

    /// Directory of VI log files.
    pub log_dir: Option<PathBuf>,

    /// PeakSimple PA log.
    pub pa_log: Option<PathBuf>,

    /// Tab-separated CRF table.
    pub crf_file: Option<PathBuf>,
}

/// Configuration for run creation.
#[derive(Debug, Default, Deserialize)]
pub struct MatchingConfig {
    /// Maximum log/line distance in minutes (exclusive).
    pub tolerance_minutes: Option<i64>,

    /// Shift records inside the known clock fault windows.
    pub correct_clock: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the given file, or `gcpeak.toml` if present, or defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Store path, falling back to the default snapshot name.
    pub fn store_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.paths.store.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    /// Pipeline settings with command-line overrides applied.
    pub fn pipeline_config(
        &self,
        tolerance_minutes: Option<i64>,
        no_clock_correction: bool,
    ) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();

        let tolerance = match tolerance_minutes.or(self.matching.tolerance_minutes) {
            Some(minutes) if minutes <= 0 => {
                anyhow::bail!("Matching tolerance must be positive, got {} minutes", minutes)
            }
            Some(minutes) => Duration::minutes(minutes),
            None => defaults.tolerance,
        };

        let correct_clock = if no_clock_correction {
            false
        } else {
            self.matching.correct_clock.unwrap_or(defaults.correct_clock)
        };

        Ok(PipelineConfig {
            tolerance,
            correct_clock,
        })
    }
}
