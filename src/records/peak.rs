use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compounds::UNIDENTIFIED;

use super::QcStatus;

/// A single integrated chromatographic peak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Compound name, lower-cased; [`UNIDENTIFIED`] when not classified
    pub name: String,
    /// Integrated peak area
    pub pa: f64,
    /// Retention time in minutes
    pub rt: f64,
    /// Mixing ratio (ppbv), present only after integration
    pub mr: Option<f64>,
    /// Number of revisions made to this peak's value
    pub rev: u32,
    /// Review state
    pub qc: QcStatus,
}

impl Peak {
    /// Create an unintegrated peak; the name is lower-cased
    pub fn new(name: &str, pa: f64, rt: f64) -> Self {
        Self {
            name: name.to_lowercase(),
            pa,
            rt,
            mr: None,
            rev: 0,
            qc: QcStatus::Unreviewed,
        }
    }

    /// Create a peak PeakSimple could not classify
    pub fn unidentified(pa: f64, rt: f64) -> Self {
        Self::new(UNIDENTIFIED, pa, rt)
    }

    /// Returns true if the peak carries the placeholder name
    pub fn is_unidentified(&self) -> bool {
        self.name == UNIDENTIFIED
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<name: {} pa: {} rt: {}, mr: ", self.name, self.pa, self.rt)?;
        match self.mr {
            Some(mr) => write!(f, "{}>", mr),
            None => write!(f, "None>"),
        }
    }
}
