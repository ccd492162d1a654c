use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

use gcpeak::pipeline::{CycleStats, Pipeline, Sources};
use gcpeak::store::MemoryStore;

use super::config::Config;

/// Run one full cycle and save the store
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    pa_log: Option<PathBuf>,
    crf_file: Option<PathBuf>,
    tolerance_minutes: Option<i64>,
    no_clock_correction: bool,
) -> Result<()> {
    let config = Config::discover(config.as_deref())?;
    let store_path = config.store_path(store);
    let pipeline_config = config.pipeline_config(tolerance_minutes, no_clock_correction)?;

    let sources = Sources {
        log_dir: log_dir.or_else(|| config.paths.log_dir.clone()),
        pa_log: pa_log.or_else(|| config.paths.pa_log.clone()),
        crf_file: crf_file.or_else(|| config.paths.crf_file.clone()),
    };
    if sources.log_dir.is_none() && sources.pa_log.is_none() && sources.crf_file.is_none() {
        anyhow::bail!("No inputs configured; pass --log-dir, --pa-log or --crf-file");
    }

    info!("gcpeak - processing cycle");
    info!("=========================");
    info!("Store: {}", store_path.display());
    if let Some(dir) = &sources.log_dir {
        info!("Logs:  {}", dir.display());
    }
    if let Some(path) = &sources.pa_log {
        info!("PA log: {}", path.display());
    }
    if let Some(path) = &sources.crf_file {
        info!("CRFs:  {}", path.display());
    }
    info!(
        "Tolerance: {} min, clock correction {}",
        pipeline_config.tolerance.num_minutes(),
        if pipeline_config.correct_clock { "on" } else { "off" }
    );

    let mut store = MemoryStore::load(&store_path)
        .with_context(|| format!("Failed to load store {}", store_path.display()))?;

    let stats = Pipeline::new(&mut store, pipeline_config)
        .run_cycle(&sources)
        .context("Processing cycle failed")?;

    if stats.changed() {
        store
            .save(&store_path)
            .with_context(|| format!("Failed to save store {}", store_path.display()))?;
    } else {
        info!("Nothing new, store left untouched");
    }

    println!("{}", format_colored(&stats));
    Ok(())
}

/// Format cycle counts, with colors when the console feature is enabled
fn format_colored(stats: &CycleStats) -> String {
    #[cfg(feature = "colorized_output")]
    {
        let steps = [
            ("Logs", stats.logs),
            ("PA lines", stats.lines),
            ("Calibrations", stats.calibrations),
            ("Runs", stats.runs),
            ("Data", stats.data),
        ];

        let mut output = String::new();
        output.push_str(&format!("{}\n", style("Processing Summary").bold().cyan()));
        output.push_str(&format!("{}\n", style("==================").cyan()));
        for (name, step) in steps {
            output.push_str(&format!(
                "{:<14}{} new, {} duplicate, {} skipped, {} failed\n",
                format!("{}:", name),
                style(step.inserted).green(),
                step.duplicates,
                style(step.skipped).yellow(),
                style(step.failed).red()
            ));
        }
        output.trim_end().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        format!("{}", stats)
    }
}
