use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MatchStatus, StatusError};

/// Sample category, mapped from the integer code the VI records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// Zero air / blank (code 0)
    Zero,
    /// Alternate standard (code 1)
    AltStandard,
    /// Working standard (code 2)
    Standard,
    /// Alternate, unconfirmed (code 3)
    AltNotSure,
    /// Ambient air (code 5)
    Ambient,
}

impl SampleType {
    /// Map a VI sample-type code; unknown codes have no category
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SampleType::Zero),
            1 => Some(SampleType::AltStandard),
            2 => Some(SampleType::Standard),
            3 => Some(SampleType::AltNotSure),
            5 => Some(SampleType::Ambient),
            _ => None,
        }
    }

    /// Name used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Zero => "zero",
            SampleType::AltStandard => "alt_standard",
            SampleType::Standard => "standard",
            SampleType::AltNotSure => "alt_not_sure",
            SampleType::Ambient => "ambient",
        }
    }

    /// Only ambient and zero samples are converted to mixing ratios
    pub fn is_integrable(&self) -> bool {
        matches!(self, SampleType::Ambient | SampleType::Zero)
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One VI log file: the record of a single ~10-minute sampling window
///
/// `date` is the start of the sampling window and is unique across logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Source file name, used to skip already-loaded files
    pub filename: String,
    /// Start of the sampling window
    pub date: NaiveDateTime,
    /// Raw sample-type code, see [`SampleType::from_code`]
    pub sample_type: i32,
    /// Sampling time (s)
    pub sample_time: f64,
    /// Sample flow through the trap (ccm)
    pub sample_flow1: f64,
    /// Remaining instrument parameters
    pub params: InstrumentParameters,
    /// Pairing state
    pub status: MatchStatus,
}

/// Instrument parameters recorded by the VI
///
/// Some are absent from early log versions, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentParameters {
    /// Secondary sample flow
    pub sample_flow2: Option<f64>,
    /// Backflush time
    pub backflush_time: Option<f64>,
    /// Trap desorption temperature
    pub desorb_temp: Option<f64>,
    /// Flash heat time
    pub flash_heat_time: Option<f64>,
    /// Injection time
    pub inject_time: Option<f64>,
    /// Bakeout temperature
    pub bakeout_temp: Option<f64>,
    /// Bakeout time
    pub bakeout_time: Option<f64>,
    /// Carrier gas flow
    pub carrier_flow: Option<f64>,
    /// Sample number
    pub sample_num: Option<i64>,
    /// Sample pressure, start
    pub sample_pressure1: Option<f64>,
    /// Sample pressure, end
    pub sample_pressure2: Option<f64>,
    /// GC head pressure
    pub gc_head_p: Option<f64>,
    /// GC head pressure, second reading
    pub gc_head_p1: Option<f64>,
    /// Water trap temperature at start
    pub wt_temp_start: Option<f64>,
    /// Adsorbent temperature at start
    pub ads_temp_start: Option<f64>,
    /// Numeric form of the VI date stamp
    pub sample_code: Option<i64>,
    /// Water trap temperature at end
    pub wt_temp_end: Option<f64>,
    /// Adsorbent temperature at end
    pub ads_temp_end: Option<f64>,
    /// Trap temperature during flash heat
    pub trap_temp_fh: Option<f64>,
    /// GC oven start temperature
    pub gc_start_temp: Option<f64>,
    /// Trap temperature at end of injection
    pub trap_temp_inject_end: Option<f64>,
    /// Battery voltage at end of injection
    pub batt_v_inject_end: Option<f64>,
    /// Trap heater output at end of injection
    pub trap_heat_out_inject_end: Option<f64>,
    /// Trap temperature at end of bakeout
    pub trap_temp_bakeout_end: Option<f64>,
    /// Battery voltage at end of bakeout
    pub batt_v_bakeout_end: Option<f64>,
    /// Trap heater output at end of bakeout
    pub trap_heat_out_bakeout_end: Option<f64>,
    /// Water trap hot temperature
    pub wt_hot_temp: Option<f64>,
    /// GC oven temperature
    pub gc_oven_temp: Option<f64>,
}

impl LogRecord {
    /// Create an unmatched log with only the parameters integration needs
    pub fn new(
        filename: &str,
        date: NaiveDateTime,
        sample_type: i32,
        sample_time: f64,
        sample_flow1: f64,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            date,
            sample_type,
            sample_time,
            sample_flow1,
            params: InstrumentParameters::default(),
            status: MatchStatus::Unmatched,
        }
    }

    /// Attach the full instrument parameter set
    pub fn with_params(mut self, params: InstrumentParameters) -> Self {
        self.params = params;
        self
    }

    /// Sample category, if the code is known
    pub fn category(&self) -> Option<SampleType> {
        SampleType::from_code(self.sample_type)
    }

    /// Mark the log as consumed by a run
    pub fn mark_matched(&mut self) -> Result<(), StatusError> {
        self.status.mark_matched()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} log {} at {}>", self.status, self.filename, self.date)
    }
}
