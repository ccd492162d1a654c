use serde::{Deserialize, Serialize};
use std::fmt;

use super::StatusError;

/// Pairing state of a log record or PA line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Available for matching
    #[default]
    Unmatched,
    /// Consumed by a run
    Matched,
}

impl MatchStatus {
    /// Name used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Unmatched => "unmatched",
            MatchStatus::Matched => "matched",
        }
    }

    /// Returns true if the record may still be matched
    pub fn is_unmatched(&self) -> bool {
        matches!(self, MatchStatus::Unmatched)
    }

    /// The only legal transition: `Unmatched -> Matched`
    pub fn mark_matched(&mut self) -> Result<(), StatusError> {
        match self {
            MatchStatus::Unmatched => {
                *self = MatchStatus::Matched;
                Ok(())
            }
            MatchStatus::Matched => Err(StatusError::IllegalTransition {
                from: MatchStatus::Matched.as_str(),
                to: MatchStatus::Matched.as_str(),
            }),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a peak correction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    /// Recorded but not yet applied to its line
    #[default]
    Unapplied,
    /// Peaks have replaced the line's peaks
    Applied,
}

impl CorrectionStatus {
    /// Name used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionStatus::Unapplied => "unapplied",
            CorrectionStatus::Applied => "applied",
        }
    }

    /// The only legal transition: `Unapplied -> Applied`
    pub fn mark_applied(&mut self) -> Result<(), StatusError> {
        match self {
            CorrectionStatus::Unapplied => {
                *self = CorrectionStatus::Applied;
                Ok(())
            }
            CorrectionStatus::Applied => Err(StatusError::IllegalTransition {
                from: CorrectionStatus::Applied.as_str(),
                to: CorrectionStatus::Applied.as_str(),
            }),
        }
    }
}

impl fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality-control state of a peak or datum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcStatus {
    /// Not yet looked at
    #[default]
    Unreviewed,
    /// Reviewed and final
    Final,
}

impl QcStatus {
    /// Name used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            QcStatus::Unreviewed => "unreviewed",
            QcStatus::Final => "final",
        }
    }
}

impl fmt::Display for QcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
