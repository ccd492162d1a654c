use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::records::{PaLine, Peak};

use super::error::parse_date;
use super::IngestError;

/// Date format of PeakSimple (columns 1 and 2 joined by a space)
pub const PA_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Parse one line of `NMHC_PA.LOG`
///
/// Each quoted column is a peak name, followed by its retention time and area.
/// Peaks whose retention time or area does not parse are dropped. A line
/// with no usable peaks yields `Ok(None)`.
pub fn parse_pa_line(line: &str) -> Result<Option<PaLine>, IngestError> {
    let columns: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if columns.len() < 3 {
        return Err(IngestError::missing("PA line date"));
    }

    let stamp = format!("{} {}", columns[1].trim(), columns[2].trim());
    let date = parse_date(&stamp, PA_DATE_FORMAT)?;

    let mut peaks = Vec::new();
    for (i, item) in columns.iter().enumerate().skip(3) {
        if !item.contains('"') {
            continue;
        }
        let name = item.trim().trim_matches('"');
        let rt = columns.get(i + 1).and_then(|v| v.trim().parse::<f64>().ok());
        let pa = columns.get(i + 2).and_then(|v| v.trim().parse::<f64>().ok());
        if let (Some(rt), Some(pa)) = (rt, pa) {
            peaks.push(Peak::new(name, pa, rt));
        }
    }

    if peaks.is_empty() {
        return Ok(None);
    }
    Ok(Some(PaLine::new(date, peaks)))
}

/// Parse every line of a PA log, skipping malformed lines with a warning
pub fn read_pa_log<R: BufRead>(reader: R) -> Result<Vec<PaLine>, IngestError> {
    let mut lines = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_pa_line(&line) {
            Ok(Some(parsed)) => lines.push(parsed),
            Ok(None) => {}
            Err(e) => warn!(
                "Line {} of the PA log was not processed: {} (line was: {:?})",
                number + 1,
                e,
                line
            ),
        }
    }
    Ok(lines)
}

/// Parse a PA log from disk
pub fn read_pa_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<PaLine>, IngestError> {
    let file = File::open(path)?;
    read_pa_log(BufReader::new(file))
}
