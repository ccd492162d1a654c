use chrono::NaiveDateTime;

use crate::records::CalibrationRecord;

/// Calibration record valid at `t`, i.e. with `date_start <= t < date_end`
///
/// Records are expected not to overlap. If they do, the first one in slice
/// order wins; see [`find_overlaps`] to detect that case at load time.
pub fn resolve(records: &[CalibrationRecord], t: NaiveDateTime) -> Option<&CalibrationRecord> {
    records.iter().find(|crf| crf.contains(t))
}

/// Index pairs of calibration records whose validity intervals overlap
pub fn find_overlaps(records: &[CalibrationRecord]) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();
    for (i, a) in records.iter().enumerate() {
        for (j, b) in records.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                overlaps.push((i, j));
            }
        }
    }
    overlaps
}
