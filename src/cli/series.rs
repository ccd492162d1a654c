use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use gcpeak::compounds::is_tracked;
use gcpeak::query::{mixing_ratio_series, ratio_series, SeriesPoint};
use gcpeak::store::MemoryStore;

use super::config::Config;

/// Date format of exported series
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Export a compound's mixing ratios (or a ratio of two compounds) as CSV
pub fn run(
    compound: String,
    ratio_to: Option<String>,
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    output: Option<PathBuf>,
) -> Result<()> {
    let compound = compound.trim().to_lowercase();
    let ratio_to = ratio_to.map(|c| c.trim().to_lowercase());
    for name in std::iter::once(&compound).chain(ratio_to.iter()) {
        if !is_tracked(name) {
            anyhow::bail!("Unknown compound: {}", name);
        }
    }

    let config = Config::discover(config.as_deref())?;
    let store_path = config.store_path(store);
    let store = MemoryStore::load(&store_path)
        .with_context(|| format!("Failed to load store {}", store_path.display()))?;

    let (column, series) = match &ratio_to {
        Some(denominator) => (
            format!("{}/{}", compound, denominator),
            ratio_series(&store, &compound, denominator, start, end),
        ),
        None => (
            compound.clone(),
            mixing_ratio_series(&store, &compound, start, end),
        ),
    };
    info!("Exporting {} points of {}", series.len(), column);

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_series(file, &column, &series)?;
        }
        None => write_series(io::stdout().lock(), &column, &series)?,
    }
    Ok(())
}

fn write_series<W: Write>(writer: W, column: &str, series: &[SeriesPoint]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", column])?;
    for (date, value) in series {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        csv_writer.write_record([date.format(EXPORT_DATE_FORMAT).to_string(), value])?;
    }
    csv_writer.flush().context("Failed to write series")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_write_series() {
        let t = NaiveDate::from_ymd_opt(2019, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut buffer = Vec::new();
        write_series(&mut buffer, "ethane", &[(t, Some(1.5)), (t, None)]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "date,ethane\n2019-01-20 12:00:00,1.5\n2019-01-20 12:00:00,\n"
        );
    }
}
