//! Transmission model and calibration
//!
//! The model reduces to a single scalar: the per-contact transmission
//! probability `p`. It is derived from epidemiologically meaningful inputs
//! through the relation
//!
//! ```text
//! R0 = c * p * Tr      =>      p = R0 / (c * Tr)
//! ```
//!
//! where `c` is the average number of contacts per tick and `Tr` the mean
//! recovery (infectious) duration in ticks. The contact rate can be supplied
//! directly (measured in an earlier calibration run) or derived analytically
//! from population density under a homogeneity assumption.
//!
//! A derived probability outside `[0, 1]` is a configuration error and is
//! rejected, never clamped.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells in a Moore neighborhood including the center
pub const MOORE_NEIGHBORHOOD_SIZE: usize = 9;

/// Errors raised by the calibration arithmetic
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("Basic reproduction number must be positive: got {r0}")]
    NonPositiveR0 { r0: f64 },

    #[error("Contact rate must be positive: got {contact_rate}")]
    NonPositiveContactRate { contact_rate: f64 },

    #[error("Mean infectious duration must be positive: got {duration_ticks} ticks")]
    NonPositiveDuration { duration_ticks: f64 },

    #[error("Derived transmission probability {p} is outside [0, 1]; \
             check R0, contact rate and durations")]
    ProbabilityOutOfRange { p: f64 },
}

/// How the average per-tick contact rate `c` is obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContactRate {
    /// `c = k * N / (W * H)` with k = 9 (Moore neighborhood with center);
    /// valid under a homogeneous-density assumption
    Analytic,
    /// A value measured empirically in an earlier calibration run
    Measured { value: f64 },
}

impl ContactRate {
    /// Resolve the contact rate for a concrete population and grid
    pub fn resolve(&self, population: usize, width: usize, height: usize) -> f64 {
        match *self {
            ContactRate::Analytic => {
                analytic_contact_rate(MOORE_NEIGHBORHOOD_SIZE, population, width, height)
            }
            ContactRate::Measured { value } => value,
        }
    }
}

/// Analytic contact rate under homogeneous density: `k * N / (W * H)`
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::analytic_contact_rate;
///
/// // 1000 agents on a 40x40 grid, 9-cell neighborhood
/// let c = analytic_contact_rate(9, 1000, 40, 40);
/// assert!((c - 5.625).abs() < 1e-12);
/// ```
pub fn analytic_contact_rate(
    neighborhood_size: usize,
    population: usize,
    width: usize,
    height: usize,
) -> f64 {
    neighborhood_size as f64 * population as f64 / (width as f64 * height as f64)
}

/// Derive the per-contact transmission probability `p = R0 / (c * Tr)`
///
/// # Arguments
/// * `r0` - Target basic reproduction number
/// * `contact_rate` - Average contacts per tick (`c`)
/// * `duration_ticks` - Mean infectious (recovery) duration in ticks (`Tr`)
///
/// # Errors
/// Rejects non-positive inputs and any derived probability outside `[0, 1]`.
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::transmission_probability;
///
/// let p = transmission_probability(3.5, 2.3, 5.0).unwrap();
/// assert!((p - 3.5 / (2.3 * 5.0)).abs() < 1e-12);
///
/// // R0 too large for this contact rate and duration
/// assert!(transmission_probability(100.0, 2.3, 5.0).is_err());
/// ```
pub fn transmission_probability(
    r0: f64,
    contact_rate: f64,
    duration_ticks: f64,
) -> Result<f64, CalibrationError> {
    if !(r0 > 0.0 && r0.is_finite()) {
        return Err(CalibrationError::NonPositiveR0 { r0 });
    }
    if !(contact_rate > 0.0 && contact_rate.is_finite()) {
        return Err(CalibrationError::NonPositiveContactRate { contact_rate });
    }
    if !(duration_ticks > 0.0 && duration_ticks.is_finite()) {
        return Err(CalibrationError::NonPositiveDuration { duration_ticks });
    }
    let p = r0 / (contact_rate * duration_ticks);
    if !(0.0..=1.0).contains(&p) {
        return Err(CalibrationError::ProbabilityOutOfRange { p });
    }
    Ok(p)
}

/// Holds the calibrated per-contact infection probability and performs the
/// Bernoulli trial that converts a contact into an exposure
#[derive(Debug, Clone, Copy)]
pub struct TransmissionModel {
    p: f64,
}

impl TransmissionModel {
    /// Create a model with an already validated probability
    ///
    /// # Errors
    /// `CalibrationError::ProbabilityOutOfRange` if `p` is outside `[0, 1]`.
    pub fn new(p: f64) -> Result<Self, CalibrationError> {
        if !(0.0..=1.0).contains(&p) || !p.is_finite() {
            return Err(CalibrationError::ProbabilityOutOfRange { p });
        }
        Ok(Self { p })
    }

    /// The per-contact transmission probability
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// One independent Bernoulli trial against a susceptible contact
    pub fn attempt(&self, rng: &mut RngManager) -> bool {
        rng.chance(self.p)
    }
}
