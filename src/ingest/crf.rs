use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::records::CalibrationRecord;

use super::error::{parse_date, parse_f64};
use super::IngestError;

/// Date format of the CRF table
pub const CRF_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Standard name assigned to every record of the CRF table
pub const WORKING_STANDARD: &str = "working standard";

/// Number of leading date columns (start, end, revision)
const DATE_COLUMNS: usize = 3;

/// Parse a tab-separated CRF table
///
/// The header's first three columns are the dates; every further column is a
/// compound name (trimmed and lower-cased). Empty factor cells are treated as
/// uncalibrated compounds. The first invalid row fails the whole table.
pub fn read_calibrations<R: Read>(reader: R) -> Result<Vec<CalibrationRecord>, IngestError> {
    let (records, mut rejected) = read_calibration_rows(reader)?;
    if rejected.is_empty() {
        Ok(records)
    } else {
        Err(rejected.remove(0))
    }
}

/// Parse a CRF table, keeping valid rows and returning invalid rows' errors
///
/// Only an unreadable file or header is an error of the whole table.
pub fn read_calibration_rows<R: Read>(
    reader: R,
) -> Result<(Vec<CalibrationRecord>, Vec<IngestError>), IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let compounds: Vec<String> = csv_reader
        .headers()?
        .iter()
        .skip(DATE_COLUMNS)
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (row, record) in csv_reader.records().enumerate() {
        let parsed = record
            .map_err(IngestError::from)
            .and_then(|record| parse_row(&compounds, row + 1, &record));
        match parsed {
            Ok(Some(crf)) => records.push(crf),
            Ok(None) => {}
            Err(e) => rejected.push(e),
        }
    }

    Ok((records, rejected))
}

fn parse_row(
    compounds: &[String],
    row: usize,
    record: &csv::StringRecord,
) -> Result<Option<CalibrationRecord>, IngestError> {
    if record.iter().all(|field| field.trim().is_empty()) {
        return Ok(None);
    }

    let date = |i: usize, what: &str| -> Result<_, IngestError> {
        let value = record
            .get(i)
            .ok_or_else(|| IngestError::missing(format!("{} on row {}", what, row)))?;
        parse_date(value.trim(), CRF_DATE_FORMAT)
    };
    let date_start = date(0, "date_start")?;
    let date_end = date(1, "date_end")?;
    let date_revision = date(2, "date_revision")?;

    let mut factors = BTreeMap::new();
    for (compound, value) in compounds.iter().zip(record.iter().skip(DATE_COLUMNS)) {
        if compound.is_empty() || value.trim().is_empty() {
            continue;
        }
        factors.insert(compound.clone(), parse_f64(compound, value)?);
    }

    CalibrationRecord::new(
        date_start,
        date_end,
        date_revision,
        WORKING_STANDARD,
        factors,
    )
    .map(Some)
    .map_err(|source| IngestError::InvalidCalibration { row, source })
}

/// Parse a CRF table from disk
pub fn read_calibrations_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<CalibrationRecord>, IngestError> {
    let file = File::open(path)?;
    read_calibrations(BufReader::new(file))
}

/// Parse a CRF table from disk, keeping valid rows
pub fn read_calibration_rows_file<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<CalibrationRecord>, Vec<IngestError>), IngestError> {
    let file = File::open(path)?;
    read_calibration_rows(BufReader::new(file))
}
