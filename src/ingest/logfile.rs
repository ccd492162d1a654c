use log::{debug, warn};
use std::path::Path;

use crate::records::{InstrumentParameters, LogRecord};

use super::error::{parse_date, parse_f64};
use super::IngestError;

/// Date stamp format of the VI (year, day of year, time)
pub const LOG_DATE_FORMAT: &str = "%Y%j%H%M%S";

/// Line holding the date stamp in column 0
const DATE_LINE: usize = 17;

/// Returns true for file names the VI gives its logs
pub fn is_log_file_name(name: &str) -> bool {
    name.contains("l.txt")
}

struct Fields<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn column(&self, line: usize, column: usize) -> Result<&'a str, IngestError> {
        self.lines
            .get(line)
            .and_then(|l| l.split('\t').nth(column))
            .ok_or_else(|| IngestError::missing(format!("line {} column {}", line + 1, column)))
    }

    fn float(&self, line: usize) -> Result<f64, IngestError> {
        parse_f64(&format!("line {}", line + 1), self.column(line, 1)?)
    }

    fn code(&self, line: usize) -> Result<i64, IngestError> {
        Ok(self.float(line)? as i64)
    }
}

/// Parse the contents of one VI log file
pub fn parse_log_file(filename: &str, contents: &str) -> Result<LogRecord, IngestError> {
    let fields = Fields {
        lines: contents.lines().collect(),
    };

    let line_count = fields.lines.len();
    if line_count != 30 && line_count != 34 {
        return Err(IngestError::UnsupportedLayout {
            filename: filename.to_string(),
            lines: line_count,
        });
    }

    let stamp = fields.column(DATE_LINE, 0)?.trim();
    let date = parse_date(stamp, LOG_DATE_FORMAT)?;
    let sample_code = stamp
        .parse::<i64>()
        .map_err(|_| IngestError::number("sample code", stamp))?;

    let mut params = InstrumentParameters {
        sample_flow2: Some(fields.float(19)?),
        backflush_time: Some(fields.float(3)?),
        desorb_temp: Some(fields.float(4)?),
        flash_heat_time: Some(fields.float(5)?),
        inject_time: Some(fields.float(6)?),
        bakeout_temp: Some(fields.float(7)?),
        bakeout_time: Some(fields.float(8)?),
        carrier_flow: Some(fields.float(9)?),
        sample_num: Some(fields.code(11)?),
        sample_pressure1: Some(fields.float(12)?),
        sample_pressure2: Some(fields.float(18)?),
        gc_head_p: Some(fields.float(13)?),
        wt_temp_start: Some(fields.float(14)?),
        ads_temp_start: Some(fields.float(15)?),
        sample_code: Some(sample_code),
        wt_temp_end: Some(fields.float(20)?),
        ads_temp_end: Some(fields.float(21)?),
        trap_temp_fh: Some(fields.float(23)?),
        gc_start_temp: Some(fields.float(24)?),
        trap_temp_inject_end: Some(fields.float(26)?),
        ..Default::default()
    };

    if line_count == 30 {
        params.trap_temp_bakeout_end = Some(fields.float(26)?);
        params.wt_hot_temp = Some(fields.float(27)?);
        params.gc_head_p1 = Some(fields.float(28)?);
        params.gc_oven_temp = Some(fields.float(29)?);
    } else {
        params.batt_v_inject_end = Some(fields.float(26)?);
        params.trap_heat_out_inject_end = Some(fields.float(27)?);
        params.trap_temp_bakeout_end = Some(fields.float(28)?);
        params.batt_v_bakeout_end = Some(fields.float(29)?);
        params.trap_heat_out_bakeout_end = Some(fields.float(30)?);
        params.wt_hot_temp = Some(fields.float(31)?);
        params.gc_head_p1 = Some(fields.float(32)?);
        params.gc_oven_temp = Some(fields.float(33)?);
    }

    let log = LogRecord::new(
        filename,
        date,
        fields.code(2)? as i32,
        fields.float(0)?,
        fields.float(1)?,
    );
    Ok(log.with_params(params))
}

/// Load every log file in `dir` whose name `is_known` does not recognize
///
/// Files that fail to parse are skipped with a warning. Results are sorted by
/// file name.
pub fn read_log_dir<P, F>(dir: P, is_known: F) -> Result<Vec<LogRecord>, IngestError>
where
    P: AsRef<Path>,
    F: Fn(&str) -> bool,
{
    let mut names: Vec<String> = std::fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_log_file_name(name) && !is_known(name))
        .collect();
    names.sort();

    let mut logs = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.as_ref().join(&name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Log file {} could not be read and was ignored: {}", name, e);
                continue;
            }
        };
        match parse_log_file(&name, &contents) {
            Ok(log) => {
                debug!("Parsed log {} at {}", name, log.date);
                logs.push(log);
            }
            Err(e) => warn!("Log file {} failed to be processed and was ignored: {}", name, e),
        }
    }

    Ok(logs)
}
