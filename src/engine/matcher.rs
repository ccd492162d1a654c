use chrono::{Duration, NaiveDateTime};
use log::{debug, trace};

use crate::compounds::match_tolerance;
use crate::records::{LogRecord, PaLine};
use crate::run::Run;

/// Pairs log records with PA lines by nearest timestamp
///
/// Assignment is greedy: logs are visited in stream order and each takes the
/// closest line that is still unmatched. This is not a globally optimal
/// bipartite assignment. Equally close lines are resolved by stream order.
#[derive(Debug, Clone, Copy)]
pub struct TemporalMatcher {
    tolerance: Duration,
}

impl Default for TemporalMatcher {
    fn default() -> Self {
        Self {
            tolerance: match_tolerance(),
        }
    }
}

fn distance(a: NaiveDateTime, b: NaiveDateTime) -> Duration {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

impl TemporalMatcher {
    /// Create a matcher; a pair matches only if strictly closer than `tolerance`
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    /// Matching tolerance (exclusive)
    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Match every unmatched log against the unmatched lines
    ///
    /// Both records of a pair are marked matched as the run is created, so
    /// re-running over the same inputs yields no further runs. Logs with no
    /// line inside the tolerance are left unmatched for a later pass.
    pub fn match_records(&self, logs: &mut [LogRecord], lines: &mut [PaLine]) -> Vec<Run> {
        let mut runs = Vec::new();

        for log in logs.iter_mut().filter(|log| log.status.is_unmatched()) {
            let closest = lines
                .iter_mut()
                .filter(|line| line.status.is_unmatched())
                .map(|line| (distance(line.date, log.date), line))
                .min_by_key(|(d, _)| *d);

            let Some((diff, line)) = closest else {
                trace!("No unmatched PA lines left for log at {}", log.date);
                continue;
            };

            if diff >= self.tolerance {
                trace!(
                    "Closest PA line to log at {} is {} min away, leaving unmatched",
                    log.date,
                    diff.num_minutes()
                );
                continue;
            }

            if log.mark_matched().is_err() || line.mark_matched().is_err() {
                continue;
            }

            debug!("Matched log {} to PA line at {}", log.filename, line.date);
            runs.push(Run::new(log.clone(), line.clone()));
        }

        runs
    }
}
