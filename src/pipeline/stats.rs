use std::fmt;

use crate::store::MergeOutcome;

/// Counts for one pipeline step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Entities newly stored
    pub inserted: usize,
    /// Entities whose key was already stored
    pub duplicates: usize,
    /// Candidates left for a later invocation
    pub skipped: usize,
    /// Candidates that failed and were logged
    pub failed: usize,
}

impl StepStats {
    pub(super) fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Duplicate => self.duplicates += 1,
        }
    }
}

impl fmt::Display for StepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} duplicate, {} skipped, {} failed",
            self.inserted, self.duplicates, self.skipped, self.failed
        )
    }
}

/// Per-step counts for one full cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Log ingestion
    pub logs: StepStats,
    /// PA line ingestion
    pub lines: StepStats,
    /// Calibration loading
    pub calibrations: StepStats,
    /// Run creation
    pub runs: StepStats,
    /// Integration
    pub data: StepStats,
}

impl CycleStats {
    /// Returns true if the cycle stored anything new
    pub fn changed(&self) -> bool {
        [self.logs, self.lines, self.calibrations, self.runs, self.data]
            .iter()
            .any(|s| s.inserted > 0)
    }
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logs:         {}", self.logs)?;
        writeln!(f, "PA lines:     {}", self.lines)?;
        writeln!(f, "Calibrations: {}", self.calibrations)?;
        writeln!(f, "Runs:         {}", self.runs)?;
        write!(f, "Data:         {}", self.data)
    }
}
