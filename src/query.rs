//! # Mixing Ratio Series
//!
//! Read-side helpers that turn integrated data into time series keyed by the
//! run start date, the way they are plotted and exported.
//!
//! Bounds follow one rule for a single bound and another for a pair: a lone
//! `start` or `end` is exclusive, while `start` and `end` together select the
//! closed range `[start, end]`.

use chrono::NaiveDateTime;

use crate::run::Datum;
use crate::store::Store;

/// One point of a series; the value is absent where no mixing ratio exists
pub type SeriesPoint = (NaiveDateTime, Option<f64>);

fn in_bounds(t: NaiveDateTime, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= t && t <= end,
        (Some(start), None) => t > start,
        (None, Some(end)) => t < end,
        (None, None) => true,
    }
}

fn has_peak(datum: &Datum, name: &str) -> bool {
    datum.peaks().iter().any(|peak| peak.name == name)
}

fn series_by<S, P, F>(
    store: &S,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    include: P,
    value: F,
) -> Vec<SeriesPoint>
where
    S: Store + ?Sized,
    P: Fn(&Datum) -> bool,
    F: Fn(&Datum) -> Option<f64>,
{
    let mut points: Vec<SeriesPoint> = store
        .data()
        .into_iter()
        .filter(|datum| include(datum))
        .map(|datum| (datum.run().date_start(), datum))
        .filter(|(t, _)| in_bounds(*t, start, end))
        .map(|(t, datum)| (t, value(datum)))
        .collect();
    points.sort_by_key(|(t, _)| *t);
    points
}

/// Mixing ratio of `compound` for every datum in the bounds, in time order
///
/// Only data with a peak named `compound` appear. Such a peak without a
/// mixing ratio (an uncalibrated compound) is kept with an absent value.
pub fn mixing_ratio_series<S: Store + ?Sized>(
    store: &S,
    compound: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Vec<SeriesPoint> {
    series_by(store, start, end, |d| has_peak(d, compound), |d| d.mr(compound))
}

/// Per-datum ratio `numerator / denominator` of two mixing ratios
///
/// Only data with peaks of both compounds appear. The ratio is absent where
/// either mixing ratio is absent or the denominator is zero.
pub fn ratio_series<S: Store + ?Sized>(
    store: &S,
    numerator: &str,
    denominator: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Vec<SeriesPoint> {
    let both = |d: &Datum| has_peak(d, numerator) && has_peak(d, denominator);
    series_by(store, start, end, both, |datum| {
        match (datum.mr(numerator), datum.mr(denominator)) {
            (Some(a), Some(b)) if b != 0.0 => Some(a / b),
            _ => None,
        }
    })
}
