use chrono::Duration;
use std::path::PathBuf;

use crate::compounds::match_tolerance;

/// Tunables for one pipeline invocation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum log/line distance (exclusive)
    pub tolerance: Duration,
    /// Shift records stamped inside the known clock fault windows
    pub correct_clock: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: match_tolerance(),
            correct_clock: true,
        }
    }
}

/// Raw inputs read by [`Pipeline::run_cycle`](super::Pipeline::run_cycle)
///
/// Any source left as `None` is skipped for that cycle.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Directory of instrument log files
    pub log_dir: Option<PathBuf>,
    /// PeakSimple PA log
    pub pa_log: Option<PathBuf>,
    /// Calibration response factor table
    pub crf_file: Option<PathBuf>,
}
