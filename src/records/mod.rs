//! # Instrument Records
//!
//! Entities produced by the raw-format adapters and consumed by the engine:
//!
//! 1. **Log records**: one per ~10-minute sampling window, written by the
//!    LabView VI. Carries the sample type and instrument parameters.
//!
//! 2. **PA lines**: one per chromatographic analysis, written by PeakSimple
//!    to `NMHC_PA.LOG`. Carries the integrated peaks.
//!
//! 3. **Calibration records**: time-bounded carbon response factors.
//!
//! 4. **Peak corrections**: reviewed replacement peak lists for a PA line.
//!
//! Status fields are explicit enums with a fixed set of legal transitions.

mod calibration;
mod correction;
mod error;
mod line;
mod logfile;
mod peak;
mod status;


pub use calibration::CalibrationRecord;
pub use correction::PeakCorrection;
pub use error::{CalibrationError, StatusError};
pub use line::PaLine;
pub use logfile::{InstrumentParameters, LogRecord, SampleType};
pub use peak::Peak;
pub use status::{CorrectionStatus, MatchStatus, QcStatus};
