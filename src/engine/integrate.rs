use log::trace;

use crate::compounds::{expected_carbon_number, is_tracked, NORMALIZATION_VOLUME};
use crate::records::CalibrationRecord;
use crate::run::{Datum, Run};

use super::IntegrationError;

/// Converts peak areas to mixing ratios
///
/// For every quantified, calibrated peak:
///
/// ```text
/// mr = pa / (crf * ecn * sample_time * sample_flow1) * 600
/// ```
///
/// where `ecn` is the expected carbon number and 600 normalizes to a 600 s
/// sample volume by project convention.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationEngine {
    normalization_volume: f64,
}

impl Default for IntegrationEngine {
    fn default() -> Self {
        Self {
            normalization_volume: NORMALIZATION_VOLUME,
        }
    }
}

impl IntegrationEngine {
    /// Integrate a run against its calibration
    ///
    /// Returns `Ok(None)` without a calibration or for sample types other than
    /// ambient and zero. Peaks that are unidentified or missing from the
    /// calibration keep an absent mixing ratio.
    pub fn integrate(
        &self,
        mut run: Run,
        calibration: Option<&CalibrationRecord>,
    ) -> Result<Option<Datum>, IntegrationError> {
        let Some(crf) = calibration else {
            return Ok(None);
        };

        if !run.sample_type().is_some_and(|t| t.is_integrable()) {
            trace!("Run at {} is not an ambient or zero sample", run.key());
            return Ok(None);
        }

        if run.peaks().is_empty() {
            return Err(IntegrationError::EmptyRun(run.key()));
        }

        let sample_time = run.sample_time();
        let sample_flow = run.sample_flow1();
        let volume = sample_time * sample_flow;
        if !volume.is_finite() || volume <= 0.0 {
            return Err(IntegrationError::InvalidSampleVolume {
                date: run.key(),
                sample_time,
                sample_flow,
            });
        }

        for peak in run.peaks_mut().iter_mut() {
            if !is_tracked(&peak.name) {
                continue;
            }
            let (Some(factor), Some(ecn)) =
                (crf.factor(&peak.name), expected_carbon_number(&peak.name))
            else {
                continue;
            };
            peak.mr = Some(
                peak.pa / (factor * ecn * sample_time * sample_flow) * self.normalization_volume,
            );
        }

        Ok(Some(Datum::new(run, crf.clone())))
    }
}
