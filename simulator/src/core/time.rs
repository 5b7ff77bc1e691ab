//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. A configurable number of ticks
//! forms one calendar day; epidemiological parameters (incubation time,
//! recovery time) are stated in days and converted to ticks through this
//! scaling factor.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks and days
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(5); // 5 ticks per day
/// assert_eq!(time.current_tick(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Number of ticks in one calendar day
    ticks_per_day: usize,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Arguments
    /// * `ticks_per_day` - Number of ticks in one calendar day
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero. Callers constructing from external
    /// configuration validate first and surface a configuration error.
    pub fn new(ticks_per_day: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        Self {
            current_tick: 0,
            ticks_per_day,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the current day (0-indexed)
    ///
    /// # Example
    /// ```
    /// use epidemic_simulator_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new(5);
    /// for _ in 0..5 {
    ///     time.advance_tick();
    /// }
    /// assert_eq!(time.current_day(), 1);
    /// ```
    pub fn current_day(&self) -> usize {
        self.current_tick / self.ticks_per_day
    }

    /// Convert a duration in days to whole ticks, rounding to nearest
    ///
    /// # Example
    /// ```
    /// use epidemic_simulator_core_rs::TimeManager;
    ///
    /// let time = TimeManager::new(10);
    /// assert_eq!(time.days_to_ticks(5.0), 50);
    /// assert_eq!(time.days_to_ticks(0.26), 3);
    /// ```
    pub fn days_to_ticks(&self, days: f64) -> usize {
        days_to_ticks(days, self.ticks_per_day)
    }

    /// Get ticks per day
    pub fn ticks_per_day(&self) -> usize {
        self.ticks_per_day
    }
}

/// Convert a non-negative duration in days to whole ticks, rounding to nearest
pub fn days_to_ticks(days: f64, ticks_per_day: usize) -> usize {
    debug_assert!(days >= 0.0, "duration in days must be non-negative");
    (days * ticks_per_day as f64).round().max(0.0) as usize
}
