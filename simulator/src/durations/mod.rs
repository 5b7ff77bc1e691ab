//! Duration providers
//!
//! Supply incubation and recovery durations, in ticks, at agent-creation
//! time. Two strategies exist: fixed (every agent gets the configured mean)
//! and sampled (each agent draws independently from a configured continuous
//! distribution). The engine depends only on the `DurationProvider`
//! contract: "return one duration in ticks".
//!
//! Durations are configured in days and scaled by ticks-per-day.

mod fixed;
mod stochastic;

pub use fixed::FixedDurations;
pub use stochastic::SampledDurations;

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a duration configuration is invalid
#[derive(Debug, Error, PartialEq)]
pub enum DurationError {
    #[error("Duration must be positive: got {days} days")]
    NonPositiveDays { days: f64 },

    #[error("Gamma parameters must be positive: shape={shape}, scale={scale}")]
    InvalidGamma { shape: f64, scale: f64 },

    #[error("Normal parameters invalid: mean={mean_days} must be positive, std={std_days} must be non-negative")]
    InvalidNormal { mean_days: f64, std_days: f64 },
}

/// Duration sampling strategy, as it appears in the simulation config
///
/// All parameters are in days; the provider converts to ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DurationConfig {
    /// Every agent receives the same duration
    Fixed { days: f64 },
    /// Each agent draws from Gamma(shape, scale) days
    Gamma { shape: f64, scale: f64 },
    /// Each agent draws from Normal(mean, std) days, truncated at zero
    Normal { mean_days: f64, std_days: f64 },
}

impl DurationConfig {
    /// Build the provider this configuration describes
    ///
    /// # Errors
    /// `DurationError` when a parameter is non-positive (durations are never
    /// silently clamped or defaulted).
    pub fn build(&self, ticks_per_day: usize) -> Result<Box<dyn DurationProvider>, DurationError> {
        match *self {
            DurationConfig::Fixed { days } => {
                Ok(Box::new(FixedDurations::new(days, ticks_per_day)?))
            }
            DurationConfig::Gamma { shape, scale } => {
                Ok(Box::new(SampledDurations::gamma(shape, scale, ticks_per_day)?))
            }
            DurationConfig::Normal {
                mean_days,
                std_days,
            } => Ok(Box::new(SampledDurations::normal(
                mean_days,
                std_days,
                ticks_per_day,
            )?)),
        }
    }
}

/// Pluggable duration sampling strategy
pub trait DurationProvider {
    /// Draw one duration in ticks for a newly created agent
    fn sample_ticks(&self, rng: &mut RngManager) -> usize;

    /// Mean duration in ticks, used by the calibration arithmetic
    fn mean_ticks(&self) -> f64;
}
