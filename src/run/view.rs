use chrono::NaiveDateTime;
use serde::Serialize;

use crate::records::{InstrumentParameters, MatchStatus, Peak};

use super::Run;

/// Flattened, read-only view of a run for reporting and export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunView {
    /// Start of the sampling window
    pub date_start: NaiveDateTime,
    /// Analysis time
    pub date_end: NaiveDateTime,
    /// Source log file name
    pub filename: String,
    /// Sample category name, if known
    pub sample_type: Option<&'static str>,
    /// Sampling time (s)
    pub sample_time: f64,
    /// Sample flow (ccm)
    pub sample_flow1: f64,
    /// Remaining instrument parameters
    #[serde(flatten)]
    pub params: InstrumentParameters,
    /// Log pairing state
    pub log_status: MatchStatus,
    /// Line pairing state
    pub line_status: MatchStatus,
    /// Peaks in file order
    pub peaks: Vec<Peak>,
}

impl RunView {
    pub(super) fn from_run(run: &Run) -> Self {
        let log = run.log();
        Self {
            date_start: run.date_start(),
            date_end: run.date_end(),
            filename: log.filename.clone(),
            sample_type: run.sample_type().map(|t| t.as_str()),
            sample_time: log.sample_time,
            sample_flow1: log.sample_flow1,
            params: log.params.clone(),
            log_status: log.status,
            line_status: run.line().status,
            peaks: run.peaks().to_vec(),
        }
    }
}
