//! Opt-in fault injection for exercising client error handling.
//!
//! Disabled unless a non-zero failure rate is configured. Faults are raised
//! by the consultation service before matching; the matcher itself stays
//! deterministic.

use rand::Rng;
use tracing::warn;

use crate::error::SymptomateError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultInjector {
    failure_rate: f64,
}

impl FaultInjector {
    /// An injector that never fails.
    pub fn disabled() -> Self {
        Self { failure_rate: 0.0 }
    }

    /// An injector failing with probability `failure_rate` (0.0 - 1.0).
    pub fn with_rate(failure_rate: f64) -> Result<Self, SymptomateError> {
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(SymptomateError::Config(format!(
                "fault rate must be between 0 and 1, got {}",
                failure_rate
            )));
        }
        Ok(Self { failure_rate })
    }

    pub fn is_enabled(&self) -> bool {
        self.failure_rate > 0.0
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Roll for a simulated failure.
    pub fn check(&self) -> Result<(), SymptomateError> {
        if self.is_enabled() && rand::rng().random_bool(self.failure_rate) {
            warn!("Injected analysis fault (rate {})", self.failure_rate);
            return Err(SymptomateError::Analysis(
                "simulated analysis failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::disabled()
    }
}
