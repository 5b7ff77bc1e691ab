//! Fixed duration provider: every agent receives the configured mean

use crate::core::time::days_to_ticks;
use crate::durations::{DurationError, DurationProvider};
use crate::rng::RngManager;

/// Deterministic provider returning the same duration for every agent
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::{FixedDurations, RngManager};
/// use epidemic_simulator_core_rs::durations::DurationProvider;
///
/// let provider = FixedDurations::new(5.0, 10).unwrap();
/// let mut rng = RngManager::new(1);
/// assert_eq!(provider.sample_ticks(&mut rng), 50);
/// ```
#[derive(Debug, Clone)]
pub struct FixedDurations {
    ticks: usize,
}

impl FixedDurations {
    /// Create a provider for `days` scaled by `ticks_per_day`
    ///
    /// # Errors
    /// `DurationError::NonPositiveDays` if `days` is not strictly positive.
    pub fn new(days: f64, ticks_per_day: usize) -> Result<Self, DurationError> {
        if !(days > 0.0) {
            return Err(DurationError::NonPositiveDays { days });
        }
        Ok(Self {
            ticks: days_to_ticks(days, ticks_per_day),
        })
    }
}

impl DurationProvider for FixedDurations {
    fn sample_ticks(&self, _rng: &mut RngManager) -> usize {
        self.ticks
    }

    fn mean_ticks(&self) -> f64 {
        self.ticks as f64
    }
}
