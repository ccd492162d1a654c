use chrono::NaiveDateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::records::{CalibrationRecord, LogRecord, PaLine, PeakCorrection};
use crate::run::{Datum, Run};

use super::{MergeOutcome, Store, StoreError, StoreSummary};

/// In-memory store with JSON snapshot persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    logs: BTreeMap<NaiveDateTime, LogRecord>,
    lines: BTreeMap<NaiveDateTime, PaLine>,
    calibrations: Vec<CalibrationRecord>,
    runs: BTreeMap<NaiveDateTime, Run>,
    data: BTreeMap<NaiveDateTime, Datum>,
    corrections: BTreeMap<NaiveDateTime, PeakCorrection>,
}

/// On-disk form; every entity carries its own key
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    logs: Vec<LogRecord>,
    lines: Vec<PaLine>,
    calibrations: Vec<CalibrationRecord>,
    runs: Vec<Run>,
    data: Vec<Datum>,
    corrections: Vec<PeakCorrection>,
}

fn insert_absent<V>(
    map: &mut BTreeMap<NaiveDateTime, V>,
    key: NaiveDateTime,
    value: V,
    kind: &str,
) -> MergeOutcome {
    if map.contains_key(&key) {
        debug!("Skipped duplicate {} at {}", kind, key);
        return MergeOutcome::Duplicate;
    }
    map.insert(key, value);
    MergeOutcome::Inserted
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot; a missing file yields an empty store
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No store at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write a snapshot atomically, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, &self.to_snapshot())?;
            writer.flush()?;
        }
        temp.persist(path)?;

        debug!("Saved store to {}", path.display());
        Ok(())
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for log in snapshot.logs {
            store.logs.insert(log.date, log);
        }
        for line in snapshot.lines {
            store.lines.insert(line.date, line);
        }
        store.calibrations = snapshot.calibrations;
        for run in snapshot.runs {
            store.runs.insert(run.key(), run);
        }
        for datum in snapshot.data {
            store.data.insert(datum.key(), datum);
        }
        for correction in snapshot.corrections {
            store.corrections.insert(correction.line_date, correction);
        }
        store
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            logs: self.logs.values().cloned().collect(),
            lines: self.lines.values().cloned().collect(),
            calibrations: self.calibrations.clone(),
            runs: self.runs.values().cloned().collect(),
            data: self.data.values().cloned().collect(),
            corrections: self.corrections.values().cloned().collect(),
        }
    }

    /// Stored run by key
    pub fn run(&self, key: NaiveDateTime) -> Option<&Run> {
        self.runs.get(&key)
    }

    /// Stored datum by key
    pub fn datum(&self, key: NaiveDateTime) -> Option<&Datum> {
        self.data.get(&key)
    }

    /// Stored log by date
    pub fn log(&self, date: NaiveDateTime) -> Option<&LogRecord> {
        self.logs.get(&date)
    }

    /// Stored PA line by date
    pub fn line(&self, date: NaiveDateTime) -> Option<&PaLine> {
        self.lines.get(&date)
    }
}

impl Store for MemoryStore {
    fn merge_log(&mut self, log: LogRecord) -> Result<MergeOutcome, StoreError> {
        Ok(insert_absent(&mut self.logs, log.date, log, "log"))
    }

    fn merge_line(&mut self, line: PaLine) -> Result<MergeOutcome, StoreError> {
        Ok(insert_absent(&mut self.lines, line.date, line, "PA line"))
    }

    fn merge_calibration(&mut self, crf: CalibrationRecord) -> Result<MergeOutcome, StoreError> {
        if self
            .calibrations
            .iter()
            .any(|existing| existing.date_start == crf.date_start)
        {
            debug!("Skipped duplicate calibration starting {}", crf.date_start);
            return Ok(MergeOutcome::Duplicate);
        }
        self.calibrations.push(crf);
        Ok(MergeOutcome::Inserted)
    }

    fn commit_run(&mut self, run: Run) -> Result<MergeOutcome, StoreError> {
        let key = run.key();
        if self.runs.contains_key(&key) {
            debug!("Skipped duplicate run at {}", key);
            return Ok(MergeOutcome::Duplicate);
        }

        let log_date = run.date_start();
        let mut log_status = self
            .logs
            .get(&log_date)
            .ok_or(StoreError::MissingRecord {
                kind: "log",
                date: log_date,
            })?
            .status;
        let mut line_status = self
            .lines
            .get(&key)
            .ok_or(StoreError::MissingRecord {
                kind: "PA line",
                date: key,
            })?
            .status;

        log_status
            .mark_matched()
            .map_err(|source| StoreError::AlreadyMatched {
                kind: "log",
                date: log_date,
                source,
            })?;
        line_status
            .mark_matched()
            .map_err(|source| StoreError::AlreadyMatched {
                kind: "PA line",
                date: key,
                source,
            })?;

        if let Some(log) = self.logs.get_mut(&log_date) {
            log.status = log_status;
        }
        if let Some(line) = self.lines.get_mut(&key) {
            line.status = line_status;
        }
        self.runs.insert(key, run);
        Ok(MergeOutcome::Inserted)
    }

    fn merge_datum(&mut self, datum: Datum) -> Result<MergeOutcome, StoreError> {
        Ok(insert_absent(&mut self.data, datum.key(), datum, "datum"))
    }

    fn merge_correction(
        &mut self,
        correction: PeakCorrection,
    ) -> Result<MergeOutcome, StoreError> {
        Ok(insert_absent(
            &mut self.corrections,
            correction.line_date,
            correction,
            "correction",
        ))
    }

    fn has_log_file(&self, filename: &str) -> bool {
        self.logs.values().any(|log| log.filename == filename)
    }

    fn unmatched_logs(&self) -> Vec<LogRecord> {
        self.logs
            .values()
            .filter(|log| log.status.is_unmatched())
            .cloned()
            .collect()
    }

    fn unmatched_lines(&self) -> Vec<PaLine> {
        self.lines
            .values()
            .filter(|line| line.status.is_unmatched())
            .cloned()
            .collect()
    }

    fn calibrations(&self) -> Vec<CalibrationRecord> {
        self.calibrations.clone()
    }

    fn runs_without_datum(&self) -> Vec<Run> {
        self.runs
            .iter()
            .filter(|(key, _)| !self.data.contains_key(*key))
            .map(|(_, run)| run.clone())
            .collect()
    }

    fn data(&self) -> Vec<&Datum> {
        self.data.values().collect()
    }

    fn summary(&self) -> StoreSummary {
        StoreSummary {
            logs: self.logs.len(),
            unmatched_logs: self.logs.values().filter(|l| l.status.is_unmatched()).count(),
            lines: self.lines.len(),
            unmatched_lines: self.lines.values().filter(|l| l.status.is_unmatched()).count(),
            calibrations: self.calibrations.len(),
            runs: self.runs.len(),
            data: self.data.len(),
            corrections: self.corrections.len(),
        }
    }
}
