use super::*;
use crate::records::{LogRecord, MatchStatus, PaLine, Peak, PeakCorrection};
use crate::store::{MemoryStore, Store};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs;
use tempfile::tempdir;

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn base() -> NaiveDateTime {
    dt(2019, 1, 20, 12, 0)
}

fn log_at(t: NaiveDateTime, sample_type: i32) -> LogRecord {
    LogRecord::new(&format!("{}l.txt", t.format("%Y%j%H%M%S")), t, sample_type, 10.0, 20.0)
}

fn line_at(t: NaiveDateTime) -> PaLine {
    PaLine::new(
        t,
        vec![
            Peak::new("ethane", 1000.0, 2.0),
            Peak::new("i-butane", 400.0, 5.0),
            Peak::new("-", 90.0, 5.32),
        ],
    )
}

fn crf(start: NaiveDateTime, end: NaiveDateTime) -> CalibrationRecord {
    let compounds: BTreeMap<String, f64> = [("ethane".to_string(), 2.0)].into_iter().collect();
    CalibrationRecord::new(start, end, start, "working standard", compounds).unwrap()
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    {
        let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
        pipeline
            .ingest_logs(vec![
                log_at(base(), 5),
                log_at(base() + Duration::hours(1), 2),
            ])
            .unwrap();
        pipeline
            .ingest_pa_lines(vec![
                line_at(base() + Duration::minutes(8)),
                line_at(base() + Duration::minutes(68)),
            ])
            .unwrap();
    }
    store
}

#[test]
fn test_steps_in_order() {
    let mut store = seeded_store();
    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());

    let cal = pipeline
        .load_calibrations(vec![crf(dt(2019, 1, 1, 0, 0), dt(2019, 2, 1, 0, 0))])
        .unwrap();
    assert_eq!(cal.inserted, 1);

    let runs = pipeline.create_runs().unwrap();
    assert_eq!(runs.inserted, 2);
    assert_eq!(runs.skipped, 0);

    // The standard run has a calibration but is not integrable
    let data = pipeline.integrate_runs().unwrap();
    assert_eq!(data.inserted, 1);
    assert_eq!(data.skipped, 1);
    assert_eq!(data.failed, 0);

    let key = base() + Duration::minutes(8);
    let datum = store.datum(key).unwrap();
    // 1000 / (2.0 * 2.0 * 10 * 20) * 600
    assert!((datum.mr("ethane").unwrap() - 750.0).abs() < 1e-9);
    assert_eq!(store.log(base()).unwrap().status, MatchStatus::Matched);
}

#[test]
fn test_runs_are_peak_corrected_before_commit() {
    let mut store = seeded_store();
    Pipeline::new(&mut store, PipelineConfig::default())
        .create_runs()
        .unwrap();

    let run = store.run(base() + Duration::minutes(8)).unwrap();
    // 5.32 is 0.32 after i-butane
    assert_eq!(run.pa("acetylene"), Some(90.0));
}

#[test]
fn test_stored_correction_is_not_applied_to_runs() {
    let mut store = seeded_store();
    let line = store.unmatched_lines()[0].clone();
    let correction = PeakCorrection::new(&line, vec![Peak::new("ethane", 5.0, 2.0)], None, None);
    store.merge_correction(correction).unwrap();

    Pipeline::new(&mut store, PipelineConfig::default())
        .create_runs()
        .unwrap();

    let run = store.run(line.date).unwrap();
    assert_eq!(run.pa("ethane"), Some(1000.0));
    assert_eq!(store.summary().corrections, 1);
}

#[test]
fn test_rerun_is_idempotent() {
    let mut store = seeded_store();
    let window = crf(dt(2019, 1, 1, 0, 0), dt(2019, 2, 1, 0, 0));
    {
        let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
        pipeline.load_calibrations(vec![window.clone()]).unwrap();
        pipeline.create_runs().unwrap();
        pipeline.integrate_runs().unwrap();
    }
    let before = store.summary();

    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
    let logs = pipeline.ingest_logs(vec![log_at(base(), 5)]).unwrap();
    let lines = pipeline
        .ingest_pa_lines(vec![line_at(base() + Duration::minutes(8))])
        .unwrap();
    let cal = pipeline.load_calibrations(vec![window]).unwrap();
    let runs = pipeline.create_runs().unwrap();
    let data = pipeline.integrate_runs().unwrap();

    assert_eq!(logs.inserted + lines.inserted + cal.inserted, 0);
    assert_eq!(logs.duplicates, 1);
    assert_eq!(runs, StepStats::default());
    assert_eq!(data.inserted, 0);
    assert_eq!(store.summary(), before);
}

#[test]
fn test_run_without_calibration_waits() {
    let mut store = seeded_store();
    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
    pipeline.create_runs().unwrap();

    let first = pipeline.integrate_runs().unwrap();
    assert_eq!(first.inserted, 0);
    assert_eq!(first.skipped, 2);

    pipeline
        .load_calibrations(vec![crf(dt(2019, 1, 1, 0, 0), dt(2019, 2, 1, 0, 0))])
        .unwrap();
    let second = pipeline.integrate_runs().unwrap();
    assert_eq!(second.inserted, 1);
}

#[test]
fn test_integration_failure_does_not_abort() {
    let mut store = MemoryStore::new();
    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
    let mut broken = log_at(base(), 5);
    broken.sample_time = 0.0;
    pipeline
        .ingest_logs(vec![broken, log_at(base() + Duration::hours(1), 5)])
        .unwrap();
    pipeline
        .ingest_pa_lines(vec![
            line_at(base() + Duration::minutes(8)),
            line_at(base() + Duration::minutes(68)),
        ])
        .unwrap();
    pipeline
        .load_calibrations(vec![crf(dt(2019, 1, 1, 0, 0), dt(2019, 2, 1, 0, 0))])
        .unwrap();
    pipeline.create_runs().unwrap();

    let data = pipeline.integrate_runs().unwrap();
    assert_eq!(data.failed, 1);
    assert_eq!(data.inserted, 1);
}

#[test]
fn test_unpaired_log_stays_unmatched() {
    let mut store = MemoryStore::new();
    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
    pipeline.ingest_logs(vec![log_at(base(), 5)]).unwrap();
    pipeline
        .ingest_pa_lines(vec![line_at(base() + Duration::minutes(30))])
        .unwrap();

    let runs = pipeline.create_runs().unwrap();
    assert_eq!(runs.inserted, 0);
    assert_eq!(runs.skipped, 1);
    assert_eq!(store.unmatched_logs().len(), 1);
    assert_eq!(store.unmatched_lines().len(), 1);
}

#[test]
fn test_clock_correction_at_ingest() {
    let mut store = MemoryStore::new();
    let t = dt(2017, 3, 20, 10, 0);
    let mut pipeline = Pipeline::new(&mut store, PipelineConfig::default());
    pipeline.ingest_logs(vec![log_at(t, 5)]).unwrap();
    pipeline.ingest_pa_lines(vec![line_at(t)]).unwrap();

    assert!(store.log(t - Duration::hours(1)).is_some());
    assert!(store.line(t - Duration::hours(1)).is_some());
    assert!(store.log(t).is_none());
}

#[test]
fn test_clock_correction_disabled() {
    let mut store = MemoryStore::new();
    let t = dt(2017, 3, 20, 10, 0);
    let config = PipelineConfig {
        correct_clock: false,
        ..PipelineConfig::default()
    };
    Pipeline::new(&mut store, config)
        .ingest_logs(vec![log_at(t, 5)])
        .unwrap();

    assert!(store.log(t).is_some());
}

#[test]
fn test_custom_tolerance() {
    let mut store = MemoryStore::new();
    let config = PipelineConfig {
        tolerance: Duration::minutes(5),
        ..PipelineConfig::default()
    };
    let mut pipeline = Pipeline::new(&mut store, config);
    pipeline.ingest_logs(vec![log_at(base(), 5)]).unwrap();
    pipeline
        .ingest_pa_lines(vec![line_at(base() + Duration::minutes(8))])
        .unwrap();

    assert_eq!(pipeline.create_runs().unwrap().inserted, 0);
}

fn log_file(stamp: &str, sample_type: &str) -> String {
    (0..34)
        .map(|i| match i {
            0 => "Sample Time\t10".to_string(),
            1 => "Sample Flow\t20".to_string(),
            2 => format!("Sample Type\t{}", sample_type),
            17 => format!("{}\t0", stamp),
            _ => format!("param {}\t1.0", i),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_run_cycle_from_files() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    fs::write(logs.join("2019020120000l.txt"), log_file("2019020120000", "5")).unwrap();
    fs::write(logs.join("2019020130000l.txt"), log_file("2019020130000", "5")).unwrap();

    let pa_log = dir.path().join("NMHC_PA.LOG");
    fs::write(
        &pa_log,
        "1\t01/20/2019\t12:08:00\t\"Ethane\"\t2.0\t1000\n\
         2\t01/20/2019\t13:08:00\t\"Ethane\"\t2.0\t500\n",
    )
    .unwrap();

    let crf_file = dir.path().join("crfs.txt");
    fs::write(
        &crf_file,
        "date_start\tdate_end\tdate_revision\tethane\n\
         01/01/2019 00:00\t02/01/2019 00:00\t01/01/2019 00:00\t2.0\n",
    )
    .unwrap();

    let sources = Sources {
        log_dir: Some(logs),
        pa_log: Some(pa_log),
        crf_file: Some(crf_file),
    };

    let mut store = MemoryStore::new();
    let stats = Pipeline::new(&mut store, PipelineConfig::default())
        .run_cycle(&sources)
        .unwrap();
    assert_eq!(stats.logs.inserted, 2);
    assert_eq!(stats.lines.inserted, 2);
    assert_eq!(stats.calibrations.inserted, 1);
    assert_eq!(stats.runs.inserted, 2);
    assert_eq!(stats.data.inserted, 2);
    assert!(stats.changed());

    let again = Pipeline::new(&mut store, PipelineConfig::default())
        .run_cycle(&sources)
        .unwrap();
    assert!(!again.changed());
    assert_eq!(again.logs.duplicates, 0);
    assert_eq!(again.lines.duplicates, 2);
    assert_eq!(store.data().len(), 2);
}

#[test]
fn test_bad_calibration_row_does_not_stop_the_cycle() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    fs::write(logs.join("2019020120000l.txt"), log_file("2019020120000", "5")).unwrap();

    let pa_log = dir.path().join("NMHC_PA.LOG");
    fs::write(&pa_log, "1\t01/20/2019\t12:08:00\t\"Ethane\"\t2.0\t1000\n").unwrap();

    // Second row ends before it starts
    let crf_file = dir.path().join("crfs.txt");
    fs::write(
        &crf_file,
        "date_start\tdate_end\tdate_revision\tethane\n\
         01/01/2019 00:00\t02/01/2019 00:00\t01/01/2019 00:00\t2.0\n\
         03/01/2019 00:00\t02/01/2019 00:00\t02/01/2019 00:00\t2.1\n",
    )
    .unwrap();

    let sources = Sources {
        log_dir: Some(logs),
        pa_log: Some(pa_log),
        crf_file: Some(crf_file),
    };

    let mut store = MemoryStore::new();
    let stats = Pipeline::new(&mut store, PipelineConfig::default())
        .run_cycle(&sources)
        .unwrap();
    assert_eq!(stats.calibrations.inserted, 1);
    assert_eq!(stats.calibrations.failed, 1);
    assert_eq!(stats.runs.inserted, 1);
    assert_eq!(stats.data.inserted, 1);
    assert_eq!(store.calibrations().len(), 1);
}

#[test]
fn test_unreadable_crf_file_is_counted_as_failed() {
    let dir = tempdir().unwrap();
    let crf_file = dir.path().join("crfs.txt");
    fs::write(&crf_file, [0xff, 0xfe, b'\t', 0xff, b'\n']).unwrap();

    let mut store = seeded_store();
    let stats = Pipeline::new(&mut store, PipelineConfig::default())
        .run_cycle(&Sources {
            log_dir: None,
            pa_log: None,
            crf_file: Some(crf_file),
        })
        .unwrap();
    assert_eq!(stats.calibrations.failed, 1);
    assert_eq!(stats.runs.inserted, 2);
}

#[test]
fn test_run_cycle_missing_sources() {
    let dir = tempdir().unwrap();
    let sources = Sources {
        log_dir: None,
        pa_log: Some(dir.path().join("missing.log")),
        crf_file: Some(dir.path().join("missing.txt")),
    };

    let mut store = MemoryStore::new();
    let stats = Pipeline::new(&mut store, PipelineConfig::default())
        .run_cycle(&sources)
        .unwrap();
    assert_eq!(stats, CycleStats::default());
}

#[test]
fn test_cycle_stats_display() {
    let mut stats = CycleStats::default();
    stats.runs.inserted = 3;
    let text = stats.to_string();
    assert!(text.contains("Runs:         3 new, 0 duplicate, 0 skipped, 0 failed"));
}
