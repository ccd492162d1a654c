use super::*;
use crate::records::SampleType;
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn log_contents(lines: usize, stamp: &str) -> String {
    (0..lines)
        .map(|i| match i {
            0 => "Sample Time\t10".to_string(),
            1 => "Sample Flow\t20.5".to_string(),
            2 => "Sample Type\t5.0".to_string(),
            11 => "Sample Num\t3.0".to_string(),
            17 => format!("{}\t0", stamp),
            _ => format!("param {}\t{}.25", i, i),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_parse_long_log_file() {
    // 2019, day 20, 12:00:00
    let log = parse_log_file("2019020120000l.txt", &log_contents(34, "2019020120000")).unwrap();

    assert_eq!(log.filename, "2019020120000l.txt");
    assert_eq!(log.date, dt(2019, 1, 20, 12, 0, 0));
    assert_eq!(log.sample_time, 10.0);
    assert_eq!(log.sample_flow1, 20.5);
    assert_eq!(log.category(), Some(SampleType::Ambient));
    assert_eq!(log.params.sample_num, Some(3));
    assert_eq!(log.params.sample_code, Some(2019020120000));
    assert_eq!(log.params.sample_flow2, Some(19.25));
    assert_eq!(log.params.batt_v_inject_end, Some(26.25));
    assert_eq!(log.params.gc_oven_temp, Some(33.25));
}

#[test]
fn test_parse_short_log_file() {
    let log = parse_log_file("x l.txt", &log_contents(30, "2017074080000")).unwrap();

    assert_eq!(log.date, dt(2017, 3, 15, 8, 0, 0));
    assert_eq!(log.params.trap_temp_bakeout_end, Some(26.25));
    assert_eq!(log.params.gc_oven_temp, Some(29.25));
    assert_eq!(log.params.batt_v_inject_end, None);
}

#[test]
fn test_log_file_with_unknown_layout_is_rejected() {
    let err = parse_log_file("bad", &log_contents(31, "2019020120000")).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedLayout { lines: 31, .. }));
}

#[test]
fn test_log_file_with_bad_number_is_rejected() {
    let contents = log_contents(34, "2019020120000").replacen("Sample Time\t10", "Sample Time\tNaN?", 1);
    let err = parse_log_file("bad", &contents).unwrap_err();
    assert!(matches!(err, IngestError::InvalidNumber { .. }));
}

#[test]
fn test_read_log_dir_skips_known_and_broken() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a l.txt"), log_contents(34, "2019020120000")).unwrap();
    std::fs::write(dir.path().join("b l.txt"), log_contents(34, "2019020121000")).unwrap();
    std::fs::write(dir.path().join("c l.txt"), "garbage").unwrap();
    std::fs::write(dir.path().join("notes.csv"), "ignored").unwrap();

    let logs = read_log_dir(dir.path(), |name| name == "a l.txt").unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].filename, "b l.txt");
    assert_eq!(logs[0].date, dt(2019, 1, 20, 12, 10, 0));
}

#[test]
fn test_parse_pa_line() {
    let line = "1\t01/20/2019\t12:08:00\t\"Ethane\"\t2.10\t1500.5\t\"-\"\t2.90\t12.0\t\"Propane\"\t3.45\t800.25\n";
    let parsed = parse_pa_line(line).unwrap().unwrap();

    assert_eq!(parsed.date, dt(2019, 1, 20, 12, 8, 0));
    assert_eq!(parsed.peaks.len(), 3);
    assert_eq!(parsed.peaks[0].name, "ethane");
    assert_eq!(parsed.peaks[0].rt, 2.10);
    assert_eq!(parsed.peaks[0].pa, 1500.5);
    assert!(parsed.peaks[1].is_unidentified());
    assert_eq!(parsed.pa("propane"), Some(800.25));
}

#[test]
fn test_pa_line_drops_incomplete_peaks() {
    let line = "1\t01/20/2019\t12:08:00\t\"Ethane\"\tbad\t1500.5\t\"Propane\"\t3.45\t800.25";
    let parsed = parse_pa_line(line).unwrap().unwrap();
    assert_eq!(parsed.peaks.len(), 1);
    assert_eq!(parsed.peaks[0].name, "propane");
}

#[test]
fn test_pa_line_without_peaks_is_none() {
    assert!(parse_pa_line("1\t01/20/2019\t12:08:00\t\t\t").unwrap().is_none());
}

#[test]
fn test_pa_line_with_bad_date_is_error() {
    let err = parse_pa_line("1\t2019-01-20\t12:08\t\"Ethane\"\t2.1\t10").unwrap_err();
    assert!(matches!(err, IngestError::InvalidDate { .. }));
}

#[test]
fn test_read_pa_log_skips_malformed_lines() {
    let log = "1\t01/20/2019\t12:08:00\t\"Ethane\"\t2.1\t10\n\
               garbage\n\
               \n\
               2\t01/20/2019\t12:18:00\t\"Ethane\"\t2.1\t11\n";
    let lines = read_pa_log(Cursor::new(log)).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].date, dt(2019, 1, 20, 12, 18, 0));
}

const CRF_TABLE: &str = "date_start\tdate_end\tdate_revision\tEthane\t Propane \tAcetylene\n\
01/01/2019 00:00\t02/01/2019 00:00\t01/05/2019 09:30\t2.31\t3.12\t1.9\n\
02/01/2019 00:00\t03/01/2019 00:00\t02/05/2019 09:30\t2.40\t3.20\t\n";

#[test]
fn test_read_calibrations() {
    let records = read_calibrations(Cursor::new(CRF_TABLE)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date_start, dt(2019, 1, 1, 0, 0, 0));
    assert_eq!(records[0].date_end, dt(2019, 2, 1, 0, 0, 0));
    assert_eq!(records[0].date_revision, dt(2019, 1, 5, 9, 30, 0));
    assert_eq!(records[0].standard, WORKING_STANDARD);
    assert_eq!(records[0].factor("propane"), Some(3.12));
    assert_eq!(records[0].factor("acetylene"), Some(1.9));

    // Each row owns its own factor table
    assert_eq!(records[1].factor("ethane"), Some(2.40));
    assert_eq!(records[1].factor("acetylene"), None);
}

#[test]
fn test_inverted_calibration_row_is_error() {
    let table = "date_start\tdate_end\tdate_revision\tEthane\n\
                 02/01/2019 00:00\t01/01/2019 00:00\t01/05/2019 09:30\t2.31\n";
    let err = read_calibrations(Cursor::new(table)).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCalibration { row: 1, .. }));
}

#[test]
fn test_invalid_calibration_rows_are_set_aside() {
    let table = "date_start\tdate_end\tdate_revision\tEthane\n\
                 01/01/2019 00:00\t02/01/2019 00:00\t01/05/2019 09:30\t2.31\n\
                 03/01/2019 00:00\t02/01/2019 00:00\t02/05/2019 09:30\t2.40\n\
                 03/01/2019 00:00\t04/01/2019 00:00\t03/05/2019 09:30\tn/a\n\
                 04/01/2019 00:00\t05/01/2019 00:00\t04/05/2019 09:30\t2.50\n";
    let (records, rejected) = read_calibration_rows(Cursor::new(table)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].factor("ethane"), Some(2.50));
    assert_eq!(rejected.len(), 2);
    assert!(matches!(rejected[0], IngestError::InvalidCalibration { row: 2, .. }));

    // The strict reader reports the first rejected row
    let err = read_calibrations(Cursor::new(table)).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCalibration { row: 2, .. }));
}
