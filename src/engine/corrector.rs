use log::debug;

use crate::compounds::{RtRule, REFERENCE_COMPOUND, RT_RULES, UNIDENTIFIED};
use crate::records::Peak;
use crate::run::Run;

/// Re-identifies unreliably labeled peaks from their offset to a reference peak
///
/// PeakSimple often misses or mislabels acetylene and n-butane, but both
/// elute at a near-constant offset after i-butane. This is a best-effort
/// disambiguation, not ground truth: after correction each rule's compound
/// names at most one peak, the largest one inside its window.
#[derive(Debug, Clone)]
pub struct PeakCorrector {
    reference: &'static str,
    rules: Vec<RtRule>,
}

impl Default for PeakCorrector {
    fn default() -> Self {
        Self {
            reference: REFERENCE_COMPOUND,
            rules: RT_RULES.to_vec(),
        }
    }
}

impl PeakCorrector {
    /// Create a corrector anchored on `reference`
    pub fn new(reference: &'static str, rules: Vec<RtRule>) -> Self {
        Self { reference, rules }
    }

    /// Correct a run's peak names; a run without the reference peak is returned unchanged
    pub fn correct(&self, mut run: Run) -> Run {
        let key = run.key();
        let relabeled = self.correct_peaks(run.peaks_mut());
        if relabeled > 0 {
            debug!("Relabeled {} peaks in run at {}", relabeled, key);
        }
        run
    }

    /// Correct a peak list in place, returning the number of renamed peaks
    pub fn correct_peaks(&self, peaks: &mut [Peak]) -> usize {
        let Some(reference_rt) = peaks
            .iter()
            .find(|p| p.name == self.reference)
            .map(|p| p.rt)
        else {
            return 0;
        };

        self.rules
            .iter()
            .map(|rule| apply_rule(peaks, reference_rt, rule))
            .sum()
    }
}

fn apply_rule(peaks: &mut [Peak], reference_rt: f64, rule: &RtRule) -> usize {
    let in_window = |p: &Peak| rule.window.contains(p.rt - reference_rt);
    let mut relabeled = 0;

    // Keep the largest correctly placed peak already carrying the name
    let keep = largest(peaks, |p| p.name == rule.compound && in_window(p));

    for (i, peak) in peaks.iter_mut().enumerate() {
        if peak.name == rule.compound && Some(i) != keep {
            peak.name = UNIDENTIFIED.to_string();
            relabeled += 1;
        }
    }

    if keep.is_some() {
        return relabeled;
    }

    if let Some(i) = largest(peaks, in_window) {
        peaks[i].name = rule.compound.to_string();
        relabeled += 1;
    }

    relabeled
}

/// Index of the largest-area peak matching `pred`; the first wins on ties
fn largest(peaks: &[Peak], pred: impl Fn(&Peak) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, peak) in peaks.iter().enumerate() {
        if !pred(peak) {
            continue;
        }
        match best {
            Some(b) if peaks[b].pa >= peak.pa => {}
            _ => best = Some(i),
        }
    }
    best
}
