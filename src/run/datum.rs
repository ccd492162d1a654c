use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::{CalibrationRecord, Peak, QcStatus};

use super::Run;

/// An integrated run
///
/// A peak without a mixing ratio is still a reported measurement attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    run: Run,
    calibration: CalibrationRecord,
    /// Revision count, zero when first integrated
    pub revision: u32,
    /// Review state
    pub qc: QcStatus,
    /// Free-form notes on data quality or processing
    pub notes: Option<String>,
}

impl Datum {
    pub(crate) fn new(run: Run, calibration: CalibrationRecord) -> Self {
        Self {
            run,
            calibration,
            revision: 0,
            qc: QcStatus::Unreviewed,
            notes: None,
        }
    }

    /// Natural key, identical to the run's
    pub fn key(&self) -> NaiveDateTime {
        self.run.key()
    }

    /// The integrated run
    pub fn run(&self) -> &Run {
        &self.run
    }

    /// Calibration the mixing ratios were derived with
    pub fn calibration(&self) -> &CalibrationRecord {
        &self.calibration
    }

    /// Integrated peaks
    pub fn peaks(&self) -> &[Peak] {
        self.run.peaks()
    }

    /// Mixing ratio of a compound, absent if not identified or not calibrated
    pub fn mr(&self, name: &str) -> Option<f64> {
        self.run.mr(name)
    }

    /// Response factor used for a compound
    pub fn crf(&self, name: &str) -> Option<f64> {
        self.calibration.factor(name)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<data for {} with {} peaks>",
            self.run.date_end(),
            self.run.peaks().len()
        )
    }
}
