use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::CalibrationError;

/// Carbon response factors of one standard, valid over `[date_start, date_end)`
///
/// `date_start` is the natural key used when merging into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// First instant the factors apply (inclusive)
    pub date_start: NaiveDateTime,
    /// First instant they no longer apply (exclusive)
    pub date_end: NaiveDateTime,
    /// When this revision was added to the calibration file
    pub date_revision: NaiveDateTime,
    /// Name of the standard the factors were derived from
    pub standard: String,
    /// Response factor per compound
    pub compounds: BTreeMap<String, f64>,
}

impl CalibrationRecord {
    /// Create a record, rejecting inverted intervals and unusable factors
    pub fn new(
        date_start: NaiveDateTime,
        date_end: NaiveDateTime,
        date_revision: NaiveDateTime,
        standard: &str,
        compounds: BTreeMap<String, f64>,
    ) -> Result<Self, CalibrationError> {
        if date_end <= date_start {
            return Err(CalibrationError::InvertedInterval {
                start: date_start,
                end: date_end,
            });
        }

        if let Some((compound, value)) = compounds
            .iter()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(CalibrationError::InvalidFactor {
                compound: compound.clone(),
                value: *value,
            });
        }

        Ok(Self {
            date_start,
            date_end,
            date_revision,
            standard: standard.to_string(),
            compounds,
        })
    }

    /// Returns true if `t` lies in `[date_start, date_end)`
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.date_start <= t && t < self.date_end
    }

    /// Returns true if the two validity intervals share any instant
    pub fn overlaps(&self, other: &CalibrationRecord) -> bool {
        self.date_start < other.date_end && other.date_start < self.date_end
    }

    /// Response factor for a compound, if calibrated
    pub fn factor(&self, compound: &str) -> Option<f64> {
        self.compounds.get(compound).copied()
    }
}

impl fmt::Display for CalibrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<crf {} for {} to {}>",
            self.standard, self.date_start, self.date_end
        )
    }
}
