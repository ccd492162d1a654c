use chrono::NaiveDateTime;

/// Errors raised by illegal status transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// Transition not permitted by the state machine
    #[error("illegal status transition from {from} to {to}")]
    IllegalTransition {
        /// Current state
        from: &'static str,
        /// Requested state
        to: &'static str,
    },

    /// Correction targets a different PA line than the one it was recorded for
    #[error("correction for {expected} cannot be applied to line at {actual}")]
    WrongLine {
        /// Key of the line the correction belongs to
        expected: NaiveDateTime,
        /// Key of the line it was applied to
        actual: NaiveDateTime,
    },
}

/// Errors raised while constructing calibration records
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// Validity interval ends at or before it starts
    #[error("calibration interval is inverted: start {start} is not before end {end}")]
    InvertedInterval {
        /// Inclusive start
        start: NaiveDateTime,
        /// Exclusive end
        end: NaiveDateTime,
    },

    /// A response factor is zero, negative or not finite
    #[error("invalid response factor {value} for {compound}")]
    InvalidFactor {
        /// Compound name
        compound: String,
        /// Offending value
        value: f64,
    },
}
