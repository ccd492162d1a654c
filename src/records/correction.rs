use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CorrectionStatus, PaLine, Peak, StatusError};

/// A reviewed replacement peak list for one PA line
///
/// Refers to its line by natural key only; the line keeps ownership of its
/// original peaks until the correction is applied.
///
/// The store keeps corrections alongside the lines they refer to, but the
/// pipeline does not apply them. Runs are built from the line's own peaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakCorrection {
    /// Date of the PA line this corrects
    pub line_date: NaiveDateTime,
    /// Replacement peaks
    pub peaks: Vec<Peak>,
    /// Flag from the reviewed results sheet
    pub res_flag: Option<i32>,
    /// Additional QC flag
    pub flag: Option<i32>,
    /// Review state
    pub status: CorrectionStatus,
}

impl PeakCorrection {
    /// Create an unapplied correction for `line`
    pub fn new(line: &PaLine, peaks: Vec<Peak>, res_flag: Option<i32>, flag: Option<i32>) -> Self {
        Self {
            line_date: line.date,
            peaks,
            res_flag,
            flag,
            status: CorrectionStatus::Unapplied,
        }
    }

    /// Replace the line's peaks with the corrected list
    ///
    /// Each peak that replaces an existing value is counted as a revision.
    pub fn apply(&mut self, line: &mut PaLine) -> Result<(), StatusError> {
        if line.date != self.line_date {
            return Err(StatusError::WrongLine {
                expected: self.line_date,
                actual: line.date,
            });
        }
        self.status.mark_applied()?;

        let mut peaks = self.peaks.clone();
        for peak in &mut peaks {
            if let Some(prior) = line.peak(&peak.name) {
                peak.rev = prior.rev + 1;
            }
        }
        line.peaks = peaks;
        Ok(())
    }
}
