//! # gcpeak - NMHC Run Reconciliation and Calibration
//!
//! `gcpeak` turns the raw output of an automated gas-chromatograph NMHC
//! sampling system into calibrated mixing ratios. Two independent instrument
//! streams describe each chromatography run:
//!
//! - **VI logs**: one file per run with the sampling parameters (sample time,
//!   flow, sample type and roughly thirty diagnostic readings).
//! - **PeakSimple PA lines**: one line per run in `NMHC_PA.LOG` with the
//!   chromatogram's integrated peaks (name, retention time, peak area).
//!
//! Neither stream knows about the other, so the engine pairs them by time,
//! repairs the peaks PeakSimple routinely misidentifies, finds the calibration
//! valid when the run ended and converts every peak area to a mixing ratio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gcpeak::pipeline::{Pipeline, PipelineConfig, Sources};
//! use gcpeak::store::MemoryStore;
//!
//! let mut store = MemoryStore::load("gcpeak.json")?;
//! let sources = Sources {
//!     log_dir: Some("logs".into()),
//!     pa_log: Some("NMHC_PA.LOG".into()),
//!     crf_file: Some("crfs.txt".into()),
//! };
//!
//! let stats = Pipeline::new(&mut store, PipelineConfig::default()).run_cycle(&sources)?;
//! println!("{}", stats);
//!
//! store.save("gcpeak.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`compounds`]: quantified compounds, carbon numbers and retention windows
//! - [`records`]: raw entities (logs, PA lines, peaks, calibrations, corrections)
//! - [`run`]: matched runs and integrated data
//! - [`engine`]: matching, peak correction, calibration lookup, integration
//!   and clock correction
//! - [`store`]: idempotent keyed storage with a JSON snapshot
//! - [`ingest`]: parsers for the VI log, PA log and CRF table formats
//! - [`pipeline`]: one batch invocation over the whole chain
//! - [`query`]: mixing-ratio time series
//!
//! ## Mixing Ratio
//!
//! For every identified, calibrated peak of an ambient or zero run:
//!
//! ```text
//! mr = pa / (crf * ecn * sample_time * sample_flow1) * 600
//! ```
//!
//! where `crf` is the compound's response factor and `ecn` its expected carbon
//! number. All other peaks keep an absent mixing ratio.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod compounds;
pub mod engine;
pub mod ingest;
pub mod pipeline;
pub mod query;
pub mod records;
pub mod run;
pub mod store;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compounds::{COMPOUNDS, REFERENCE_COMPOUND, UNIDENTIFIED};
    pub use crate::engine::{
        resolve, IntegrationEngine, IntegrationError, PeakCorrector, TemporalMatcher,
        TimeCorrector,
    };
    pub use crate::ingest::{
        parse_log_file, parse_pa_line, read_calibrations, read_pa_log, IngestError,
    };
    pub use crate::pipeline::{CycleStats, Pipeline, PipelineConfig, Sources};
    pub use crate::query::{mixing_ratio_series, ratio_series};
    pub use crate::records::{
        CalibrationRecord, LogRecord, MatchStatus, PaLine, Peak, PeakCorrection, QcStatus,
        SampleType,
    };
    pub use crate::run::{Datum, Run};
    pub use crate::store::{MemoryStore, MergeOutcome, Store, StoreError};
}
