use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use crate::records::{LogRecord, PaLine};

/// Open interval `(start, end)` of timestamps recorded on the wrong clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockWindow {
    /// Exclusive lower bound
    pub start: NaiveDateTime,
    /// Exclusive upper bound
    pub end: NaiveDateTime,
}

impl ClockWindow {
    /// Create a window; bounds are exclusive on both ends
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns true if `t` was recorded inside the window
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start < t && t < self.end
    }
}

fn ymd_hm(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Shifts timestamps recorded in MDT during initial deployment back to MST
///
/// The VI log clock was wrong until 13:00 MST on 2017-04-11 and the
/// PeakSimple clock until 15:05 on 2017-04-27, both starting from the DST
/// change at 02:00 on 2017-03-12. Must run on raw records, exactly once,
/// before matching.
#[derive(Debug, Clone)]
pub struct TimeCorrector {
    log_window: ClockWindow,
    line_window: ClockWindow,
    shift: Duration,
}

impl Default for TimeCorrector {
    fn default() -> Self {
        Self {
            log_window: ClockWindow::new(ymd_hm(2017, 3, 12, 2, 0), ymd_hm(2017, 4, 11, 13, 0)),
            line_window: ClockWindow::new(ymd_hm(2017, 3, 12, 2, 0), ymd_hm(2017, 4, 27, 15, 5)),
            shift: Duration::hours(1),
        }
    }
}

impl TimeCorrector {
    /// Create a corrector with custom windows and shift
    pub fn new(log_window: ClockWindow, line_window: ClockWindow, shift: Duration) -> Self {
        Self {
            log_window,
            line_window,
            shift,
        }
    }

    /// Corrected form of a log timestamp
    pub fn log_time(&self, t: NaiveDateTime) -> NaiveDateTime {
        if self.log_window.contains(t) {
            t - self.shift
        } else {
            t
        }
    }

    /// Corrected form of a PA line timestamp
    pub fn line_time(&self, t: NaiveDateTime) -> NaiveDateTime {
        if self.line_window.contains(t) {
            t - self.shift
        } else {
            t
        }
    }

    /// Correct freshly parsed records in place, returning how many changed
    pub fn apply(&self, logs: &mut [LogRecord], lines: &mut [PaLine]) -> usize {
        let mut shifted = 0;

        for log in logs.iter_mut() {
            let corrected = self.log_time(log.date);
            if corrected != log.date {
                debug!("Shifted log {} from {} to {}", log.filename, log.date, corrected);
                log.date = corrected;
                shifted += 1;
            }
        }

        for line in lines.iter_mut() {
            let corrected = self.line_time(line.date);
            if corrected != line.date {
                debug!("Shifted PA line from {} to {}", line.date, corrected);
                line.date = corrected;
                shifted += 1;
            }
        }

        shifted
    }
}
