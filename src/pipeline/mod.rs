//! # Batch Pipeline
//!
//! One synchronous invocation of the whole chain, meant to be called
//! repeatedly by an external scheduler:
//!
//! ```text
//! raw logs ─┐
//!           ├─ TimeCorrector ─ merge ─ TemporalMatcher ─ PeakCorrector ─ commit run
//! PA lines ─┘                                                      │
//! CRF table ─ merge ─────────── resolve ─ IntegrationEngine ─ merge datum
//! ```
//!
//! Each step reads its candidate set from the store, computes, and merges
//! the results back by natural key, so re-running a step over the same
//! inputs changes nothing. Callers that persist the store should save it once
//! after [`Pipeline::run_cycle`] to commit the invocation as a unit.

mod config;
mod error;
mod stats;

#[cfg(test)]
mod tests;

use log::{debug, error, info, warn};
use std::path::Path;

use crate::engine::{
    find_overlaps, resolve, IntegrationEngine, PeakCorrector, TemporalMatcher, TimeCorrector,
};
use crate::ingest;
use crate::records::{CalibrationRecord, LogRecord, PaLine};
use crate::store::{MergeOutcome, Store, StoreError};

pub use config::{PipelineConfig, Sources};
pub use error::PipelineError;
pub use stats::{CycleStats, StepStats};

/// Runs the engine against a store
pub struct Pipeline<'a, S: Store> {
    store: &'a mut S,
    config: PipelineConfig,
    clock: TimeCorrector,
    matcher: TemporalMatcher,
    corrector: PeakCorrector,
    engine: IntegrationEngine,
}

impl<'a, S: Store> Pipeline<'a, S> {
    /// Create a pipeline with the default engine components
    pub fn new(store: &'a mut S, config: PipelineConfig) -> Self {
        Self {
            store,
            matcher: TemporalMatcher::new(config.tolerance),
            config,
            clock: TimeCorrector::default(),
            corrector: PeakCorrector::default(),
            engine: IntegrationEngine::default(),
        }
    }

    /// Replace the clock corrector
    pub fn with_time_corrector(mut self, clock: TimeCorrector) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the peak corrector
    pub fn with_peak_corrector(mut self, corrector: PeakCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    /// Clock-correct and merge freshly parsed log records
    pub fn ingest_logs(&mut self, mut logs: Vec<LogRecord>) -> Result<StepStats, PipelineError> {
        if self.config.correct_clock {
            self.clock.apply(&mut logs, &mut []);
        }

        let mut stats = StepStats::default();
        for log in logs {
            stats.record(self.store.merge_log(log)?);
        }
        if stats.inserted > 0 {
            info!("{} new logs were added", stats.inserted);
        }
        Ok(stats)
    }

    /// Load every new log file in `dir`
    pub fn ingest_log_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<StepStats, PipelineError> {
        let store = &*self.store;
        let logs = ingest::read_log_dir(dir, |name| store.has_log_file(name))?;
        if logs.is_empty() {
            debug!("No new logs were found");
        }
        self.ingest_logs(logs)
    }

    /// Clock-correct and merge freshly parsed PA lines
    pub fn ingest_pa_lines(&mut self, mut lines: Vec<PaLine>) -> Result<StepStats, PipelineError> {
        if self.config.correct_clock {
            self.clock.apply(&mut [], &mut lines);
        }

        let mut stats = StepStats::default();
        for line in lines {
            stats.record(self.store.merge_line(line)?);
        }
        if stats.inserted > 0 {
            info!("{} new PA lines were added", stats.inserted);
        }
        Ok(stats)
    }

    /// Merge calibration records, warning about overlapping intervals
    pub fn load_calibrations(
        &mut self,
        records: Vec<CalibrationRecord>,
    ) -> Result<StepStats, PipelineError> {
        let mut stats = StepStats::default();
        for crf in records {
            stats.record(self.store.merge_calibration(crf)?);
        }

        let all = self.store.calibrations();
        for (i, j) in find_overlaps(&all) {
            warn!(
                "Calibrations {} and {} overlap; {} takes precedence",
                all[i], all[j], all[i]
            );
        }
        Ok(stats)
    }

    /// Load the valid rows of a CRF table
    ///
    /// Rejected rows, or a table that cannot be read at all, are logged and
    /// counted as failed. Only store errors abort the step.
    pub fn ingest_crf_file<P: AsRef<Path>>(&mut self, path: P) -> Result<StepStats, PipelineError> {
        let path = path.as_ref();
        let (records, rejected) = match ingest::read_calibration_rows_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("CRF file {} could not be read: {}", path.display(), e);
                return Ok(StepStats {
                    failed: 1,
                    ..StepStats::default()
                });
            }
        };
        for e in &rejected {
            error!("Skipping calibration in {}: {}", path.display(), e);
        }

        let mut stats = self.load_calibrations(records)?;
        stats.failed += rejected.len();
        Ok(stats)
    }

    /// Match unmatched logs and lines, correct their peaks and commit the runs
    pub fn create_runs(&mut self) -> Result<StepStats, PipelineError> {
        let mut logs = self.store.unmatched_logs();
        let mut lines = self.store.unmatched_lines();
        let runs = self.matcher.match_records(&mut logs, &mut lines);

        let mut stats = StepStats::default();
        stats.skipped = logs.iter().filter(|log| log.status.is_unmatched()).count();

        for run in runs {
            let run = self.corrector.correct(run);
            let key = run.key();
            match self.store.commit_run(run) {
                Ok(outcome) => stats.record(outcome),
                Err(e @ StoreError::AlreadyMatched { .. }) => {
                    warn!("Run at {} was not committed: {}", key, e);
                    stats.failed += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if stats.inserted > 0 {
            info!("{} new runs were created", stats.inserted);
        }
        Ok(stats)
    }

    /// Integrate every run that has no datum yet
    ///
    /// Runs without a valid calibration or of a non-integrable sample type
    /// are counted as skipped and retried on the next invocation.
    pub fn integrate_runs(&mut self) -> Result<StepStats, PipelineError> {
        let calibrations = self.store.calibrations();
        let mut stats = StepStats::default();

        for run in self.store.runs_without_datum() {
            let key = run.key();
            let crf = resolve(&calibrations, run.date_end());
            match self.engine.integrate(run, crf) {
                Ok(Some(datum)) => {
                    let outcome = self.store.merge_datum(datum)?;
                    if outcome == MergeOutcome::Inserted {
                        debug!("Data for {} was added", key);
                    }
                    stats.record(outcome);
                }
                Ok(None) => stats.skipped += 1,
                Err(e) => {
                    error!("Run at {} could not be integrated: {}", key, e);
                    stats.failed += 1;
                }
            }
        }

        if stats.inserted == 0 {
            debug!("No data to integrate found");
        } else {
            info!("{} runs were integrated", stats.inserted);
        }
        Ok(stats)
    }

    /// Run every step in order against the given sources
    pub fn run_cycle(&mut self, sources: &Sources) -> Result<CycleStats, PipelineError> {
        let mut cycle = CycleStats::default();

        if let Some(dir) = &sources.log_dir {
            cycle.logs = self.ingest_log_dir(dir)?;
        }
        if let Some(path) = &sources.pa_log {
            if path.is_file() {
                let lines = ingest::read_pa_log_file(path)?;
                cycle.lines = self.ingest_pa_lines(lines)?;
            } else {
                warn!("PA log {} does not exist", path.display());
            }
        }
        if let Some(path) = &sources.crf_file {
            if path.is_file() {
                cycle.calibrations = self.ingest_crf_file(path)?;
            } else {
                warn!("CRF file {} not found, no runs can be integrated", path.display());
            }
        }

        cycle.runs = self.create_runs()?;
        cycle.data = self.integrate_runs()?;
        Ok(cycle)
    }
}
