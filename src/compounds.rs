//! # Quantified Compounds and Fixed Constants
//!
//! The constant tables that form the external contract of the engine: the
//! quantified compound list, the expected carbon numbers used by the mixing
//! ratio formula, and the retention-time windows used to disambiguate the two
//! peaks PeakSimple routinely misidentifies.
//!
//! These values must be preserved exactly. Changing any of them changes every
//! derived mixing ratio.

use chrono::Duration;

/// All quantified compounds, in reporting order
pub const COMPOUNDS: [&str; 16] = [
    "ethane",
    "ethene",
    "propane",
    "propene",
    "i-butane",
    "acetylene",
    "n-butane",
    "i-pentane",
    "n-pentane",
    "hexane",
    "isoprene",
    "benzene",
    "toluene",
    "ethyl-benzene",
    "m&p xylene",
    "o-xylene",
];

/// Expected carbon numbers, parallel to [`COMPOUNDS`]
const EXPECTED_CARBON_NUMBERS: [f64; 16] = [
    2.0, 1.9, 3.0, 2.9, 4.0, 1.8, 4.0, 5.0, 5.0, 6.0, 4.8, 5.7, 6.7, 7.7, 7.7, 7.7,
];

/// Name PeakSimple gives a peak it could not classify
pub const UNIDENTIFIED: &str = "-";

/// Reliably identified compound used as the retention-time anchor
pub const REFERENCE_COMPOUND: &str = "i-butane";

/// Sample volume normalization (seconds), by project convention
pub const NORMALIZATION_VOLUME: f64 = 600.0;

/// Maximum distance (exclusive) between a log and a PA line of the same run
pub const MATCH_TOLERANCE_MINUTES: i64 = 11;

/// Default matching tolerance as a [`Duration`]
pub fn match_tolerance() -> Duration {
    Duration::minutes(MATCH_TOLERANCE_MINUTES)
}

/// Returns the expected carbon number for a quantified compound
pub fn expected_carbon_number(name: &str) -> Option<f64> {
    COMPOUNDS
        .iter()
        .position(|c| *c == name)
        .map(|i| EXPECTED_CARBON_NUMBERS[i])
}

/// Returns true if the compound is one of the quantified compounds
pub fn is_tracked(name: &str) -> bool {
    COMPOUNDS.contains(&name)
}

/// Half-open retention-time window `[lo, hi)`, in minutes after the reference peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtWindow {
    /// Inclusive lower offset
    pub lo: f64,
    /// Exclusive upper offset
    pub hi: f64,
}

impl RtWindow {
    /// Returns true if `offset` lies inside the window
    ///
    /// Offsets and bounds are compared in whole thousandths of a minute, so a
    /// difference such as `5.30 - 5.00` counts as exactly 0.30.
    pub fn contains(&self, offset: f64) -> bool {
        let offset = thousandths(offset);
        thousandths(self.lo) <= offset && offset < thousandths(self.hi)
    }
}

fn thousandths(minutes: f64) -> i64 {
    (minutes * 1000.0).round() as i64
}

/// A compound whose identification is checked against the reference retention time
#[derive(Debug, Clone, Copy)]
pub struct RtRule {
    /// Compound name the rule assigns
    pub compound: &'static str,
    /// Expected offset from the reference peak
    pub window: RtWindow,
}

/// Acetylene elutes 0.30-0.40 min after i-butane
pub const ACETYLENE_RULE: RtRule = RtRule {
    compound: "acetylene",
    window: RtWindow { lo: 0.30, hi: 0.40 },
};

/// n-Butane elutes 0.42-0.46 min after i-butane
pub const N_BUTANE_RULE: RtRule = RtRule {
    compound: "n-butane",
    window: RtWindow { lo: 0.42, hi: 0.46 },
};

/// Rules applied by the peak corrector, in application order
pub const RT_RULES: [RtRule; 2] = [ACETYLENE_RULE, N_BUTANE_RULE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_numbers() {
        assert_eq!(expected_carbon_number("ethane"), Some(2.0));
        assert_eq!(expected_carbon_number("acetylene"), Some(1.8));
        assert_eq!(expected_carbon_number("o-xylene"), Some(7.7));
        assert_eq!(expected_carbon_number(UNIDENTIFIED), None);
        assert_eq!(expected_carbon_number("methane"), None);
    }

    #[test]
    fn test_every_compound_has_a_carbon_number() {
        for compound in COMPOUNDS {
            assert!(is_tracked(compound));
            assert!(expected_carbon_number(compound).is_some());
        }
    }

    #[test]
    fn test_window_is_half_open() {
        let w = ACETYLENE_RULE.window;
        assert!(w.contains(0.30));
        assert!(w.contains(0.35));
        assert!(!w.contains(0.40));
        assert!(!w.contains(0.29));
    }

    #[test]
    fn test_window_edges_from_retention_time_differences() {
        // 5.30 - 5.00 is 0.2999999999999998 in f64
        assert!(ACETYLENE_RULE.window.contains(5.30 - 5.00));
        // 1.40 - 1.00 is 0.3999999999999999
        assert!(!ACETYLENE_RULE.window.contains(1.40 - 1.00));
        // 5.42 - 5.00 is 0.41999999999999993
        assert!(N_BUTANE_RULE.window.contains(5.42 - 5.00));
        assert!(!N_BUTANE_RULE.window.contains(5.46 - 5.00));
    }
}
