//! # Reconciliation and Calibration Engine
//!
//! The algorithmic core, applied in this order on every batch:
//!
//! 1. [`TimeCorrector`]: undoes the known clock-zone error of early deployment
//! 2. [`TemporalMatcher`]: pairs log records with PA lines into runs
//! 3. [`PeakCorrector`]: re-identifies acetylene and n-butane by retention time
//! 4. [`resolve`] + [`IntegrationEngine`]: converts peak areas to mixing ratios
//!
//! Every step is synchronous and performs no I/O. Absence of output (no match,
//! no calibration, an unidentifiable peak) is normal control flow; only
//! invariant violations are reported as errors.

mod clock;
mod corrector;
mod error;
mod integrate;
mod matcher;
mod resolver;


pub use clock::{ClockWindow, TimeCorrector};
pub use corrector::PeakCorrector;
pub use error::IntegrationError;
pub use integrate::IntegrationEngine;
pub use matcher::TemporalMatcher;
pub use resolver::{find_overlaps, resolve};
