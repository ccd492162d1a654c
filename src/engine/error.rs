use chrono::NaiveDateTime;

/// Invariant violations detected while integrating a run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    /// The run has no peaks at all
    #[error("run at {0} has no peaks to integrate")]
    EmptyRun(NaiveDateTime),

    /// Sample time times sample flow is zero, negative or not finite
    #[error("run at {date} has an unusable sample volume ({sample_time} s x {sample_flow} ccm)")]
    InvalidSampleVolume {
        /// Run key
        date: NaiveDateTime,
        /// Sampling time (s)
        sample_time: f64,
        /// Sample flow (ccm)
        sample_flow: f64,
    },
}
