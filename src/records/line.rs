use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MatchStatus, Peak, StatusError};

/// One line of `NMHC_PA.LOG`: the peaks of a single chromatographic analysis
///
/// `date` is recorded by PeakSimple near the end of the sampling window and is
/// unique across lines. It is the natural key of the run built from this line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaLine {
    /// Time PeakSimple recorded the analysis
    pub date: NaiveDateTime,
    /// Peaks in file order
    pub peaks: Vec<Peak>,
    /// Pairing state
    pub status: MatchStatus,
}

impl PaLine {
    /// Create an unmatched line
    pub fn new(date: NaiveDateTime, peaks: Vec<Peak>) -> Self {
        Self {
            date,
            peaks,
            status: MatchStatus::Unmatched,
        }
    }

    /// First peak with the given name
    pub fn peak(&self, name: &str) -> Option<&Peak> {
        self.peaks.iter().find(|p| p.name == name)
    }

    /// Retention time of the first peak with the given name
    pub fn rt(&self, name: &str) -> Option<f64> {
        self.peak(name).map(|p| p.rt)
    }

    /// Peak area of the first peak with the given name
    pub fn pa(&self, name: &str) -> Option<f64> {
        self.peak(name).map(|p| p.pa)
    }

    /// Mixing ratio of the first peak with the given name
    pub fn mr(&self, name: &str) -> Option<f64> {
        self.peak(name).and_then(|p| p.mr)
    }

    /// Peaks PeakSimple did not classify
    pub fn unnamed_peaks(&self) -> Vec<&Peak> {
        self.peaks.iter().filter(|p| p.is_unidentified()).collect()
    }

    /// Mark the line as consumed by a run
    pub fn mark_matched(&mut self) -> Result<(), StatusError> {
        self.status.mark_matched()
    }
}

impl fmt::Display for PaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PaLine for {} with {} peaks>", self.date, self.peaks.len())
    }
}
