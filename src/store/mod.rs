//! # Backing Store
//!
//! The [`Store`] trait is the seam between the engine and persistence. Every
//! derived entity is merged by natural key, and merging an entity whose key
//! already exists is a silent no-op. That makes repeated ingestion of the same
//! raw inputs idempotent:
//!
//! | Entity | Natural key |
//! |--------|-------------|
//! | `LogRecord` | `date` |
//! | `PaLine` | `date` |
//! | `CalibrationRecord` | `date_start` |
//! | `Run` | PA line `date` |
//! | `Datum` | PA line `date` |
//! | `PeakCorrection` | PA line `date` |
//!
//! [`MemoryStore`] keeps everything in ordered maps and persists a JSON
//! snapshot. Callers wrap each batch in load → compute → save so that one
//! invocation commits as a unit.

mod error;
mod memory;


use std::fmt;

use crate::records::{CalibrationRecord, LogRecord, PaLine, PeakCorrection};
use crate::run::{Datum, Run};

pub use error::StoreError;
pub use memory::MemoryStore;

/// Result of merging one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The key was new and the entity was stored
    Inserted,
    /// An entity with the same key already existed; nothing changed
    Duplicate,
}

impl MergeOutcome {
    /// Returns true if the entity was stored
    pub fn is_inserted(&self) -> bool {
        matches!(self, MergeOutcome::Inserted)
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::Inserted => write!(f, "inserted"),
            MergeOutcome::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// Keyed storage with insert-if-absent semantics
pub trait Store {
    /// Merge a log record by date
    fn merge_log(&mut self, log: LogRecord) -> Result<MergeOutcome, StoreError>;

    /// Merge a PA line by date
    fn merge_line(&mut self, line: PaLine) -> Result<MergeOutcome, StoreError>;

    /// Merge a calibration record by start date
    fn merge_calibration(&mut self, crf: CalibrationRecord) -> Result<MergeOutcome, StoreError>;

    /// Store a run and mark its log and line matched, as one step
    ///
    /// A run whose key already exists is a duplicate and changes nothing. If
    /// either stored record is missing or already matched, nothing changes and
    /// an error is returned.
    fn commit_run(&mut self, run: Run) -> Result<MergeOutcome, StoreError>;

    /// Merge a datum by its run key
    fn merge_datum(&mut self, datum: Datum) -> Result<MergeOutcome, StoreError>;

    /// Merge a peak correction by its line key
    ///
    /// Corrections are stored for review only. No pipeline step applies them
    /// yet; callers apply them explicitly with [`PeakCorrection::apply`].
    fn merge_correction(&mut self, correction: PeakCorrection)
        -> Result<MergeOutcome, StoreError>;

    /// Returns true if a log loaded from `filename` is already stored
    fn has_log_file(&self, filename: &str) -> bool;

    /// Unmatched logs, in date order
    fn unmatched_logs(&self) -> Vec<LogRecord>;

    /// Unmatched PA lines, in date order
    fn unmatched_lines(&self) -> Vec<PaLine>;

    /// Calibration records, in load order
    fn calibrations(&self) -> Vec<CalibrationRecord>;

    /// Runs not yet integrated, in date order
    fn runs_without_datum(&self) -> Vec<Run>;

    /// All data, in date order
    fn data(&self) -> Vec<&Datum>;

    /// Entity counts
    fn summary(&self) -> StoreSummary;
}

/// Number of stored entities of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    /// Log records
    pub logs: usize,
    /// Log records still unmatched
    pub unmatched_logs: usize,
    /// PA lines
    pub lines: usize,
    /// PA lines still unmatched
    pub unmatched_lines: usize,
    /// Calibration records
    pub calibrations: usize,
    /// Runs
    pub runs: usize,
    /// Integrated data
    pub data: usize,
    /// Peak corrections
    pub corrections: usize,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logs:         {} ({} unmatched)", self.logs, self.unmatched_logs)?;
        writeln!(f, "PA lines:     {} ({} unmatched)", self.lines, self.unmatched_lines)?;
        writeln!(f, "Calibrations: {}", self.calibrations)?;
        writeln!(f, "Runs:         {}", self.runs)?;
        writeln!(f, "Data:         {}", self.data)?;
        write!(f, "Corrections:  {}", self.corrections)
    }
}
