//! # Runs and Data
//!
//! A [`Run`] is a log record and a PA line reconciled into one sampling and
//! analysis cycle. A [`Datum`] is a run that has been integrated against a
//! calibration record.
//!
//! Both own their parts outright. Log parameters are reached through explicit
//! accessors or through the flattened [`RunView`], never through delegation.

mod datum;
mod view;


use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::{LogRecord, PaLine, Peak, SampleType};

pub use datum::Datum;
pub use view::RunView;

/// A matched log record and PA line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    log: LogRecord,
    line: PaLine,
}

impl Run {
    /// Pair a log with a line; callers are responsible for marking both matched
    pub(crate) fn new(log: LogRecord, line: PaLine) -> Self {
        Self { log, line }
    }

    /// Natural key: the PA line's date
    pub fn key(&self) -> NaiveDateTime {
        self.line.date
    }

    /// Start of the sampling window (the log's date)
    pub fn date_start(&self) -> NaiveDateTime {
        self.log.date
    }

    /// Analysis time (the PA line's date)
    pub fn date_end(&self) -> NaiveDateTime {
        self.line.date
    }

    /// The matched log record
    pub fn log(&self) -> &LogRecord {
        &self.log
    }

    /// The matched PA line
    pub fn line(&self) -> &PaLine {
        &self.line
    }

    /// Peaks of the run, in file order
    pub fn peaks(&self) -> &[Peak] {
        &self.line.peaks
    }

    /// Mutable access for peak correction and integration
    pub(crate) fn peaks_mut(&mut self) -> &mut Vec<Peak> {
        &mut self.line.peaks
    }

    /// Sample category, if the log's code is known
    pub fn sample_type(&self) -> Option<SampleType> {
        self.log.category()
    }

    /// Sampling time (s)
    pub fn sample_time(&self) -> f64 {
        self.log.sample_time
    }

    /// Sample flow (ccm)
    pub fn sample_flow1(&self) -> f64 {
        self.log.sample_flow1
    }

    /// Retention time of the first peak with this name
    pub fn rt(&self, name: &str) -> Option<f64> {
        self.line.rt(name)
    }

    /// Peak area of the first peak with this name
    pub fn pa(&self, name: &str) -> Option<f64> {
        self.line.pa(name)
    }

    /// Mixing ratio of the first peak with this name
    pub fn mr(&self, name: &str) -> Option<f64> {
        self.line.mr(name)
    }

    /// Flattened read-time view
    pub fn view(&self) -> RunView {
        RunView::from_run(self)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<matched gc run at {}>", self.date_end())
    }
}
