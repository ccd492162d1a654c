//! # Raw Record Adapters
//!
//! Parsers for the three raw sources the instrument produces:
//!
//! - **VI log files** (`*l.txt`): one tab-separated parameter per line, in a
//!   fixed order. Two layouts exist: 30 lines (early deployment) and 34 lines.
//! - **`NMHC_PA.LOG`**: one tab-separated line per analysis, written by
//!   PeakSimple, with quoted peak names each followed by retention time and area.
//! - **CRF table**: tab-separated carbon response factors, one row per
//!   validity interval and one column per compound.
//!
//! Malformed log files and PA lines are dropped with a warning and never
//! reach the engine. Timestamps are returned exactly as recorded; clock
//! correction is applied by the caller.

mod crf;
mod error;
mod logfile;
mod palog;

#[cfg(test)]
mod tests;

pub use crf::{
    read_calibration_rows, read_calibration_rows_file, read_calibrations, read_calibrations_file,
    CRF_DATE_FORMAT, WORKING_STANDARD,
};
pub use error::IngestError;
pub use logfile::{is_log_file_name, parse_log_file, read_log_dir, LOG_DATE_FORMAT};
pub use palog::{parse_pa_line, read_pa_log, read_pa_log_file, PA_DATE_FORMAT};
