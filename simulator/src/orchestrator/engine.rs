//! Orchestrator engine
//!
//! Main simulation loop integrating all components:
//! - Scheduler: every agent activated exactly once per tick, in a fresh
//!   uniformly random permutation
//! - SEIR state machine evaluation per agent
//! - Transmission attempts against the Moore neighborhood
//! - Random movement on the toroidal grid
//! - Per-tick aggregation into immutable snapshots
//!
//! # Execution model
//!
//! Single-threaded, strictly sequential. Within a tick, state mutations are
//! visible to every agent activated later in the same tick ("read your
//! writes so far"), so infection outcomes depend on activation order. That
//! ordering dependency is intentional: it is what makes the trajectory
//! exactly reproducible for a fixed seed.
//!
//! ```text
//! For each tick t:
//! 1. Advance the clock
//! 2. Shuffle the roster into an activation order
//! 3. For each agent, in order:
//!    a. Exposed:     become infectious once incubation has elapsed
//!    b. Infectious:  attempt transmission in the 9-cell neighborhood,
//!                    then recover once the infectious period has elapsed
//!    c. Always:      move to a uniformly chosen neighborhood cell
//! 4. Census the population and append a snapshot
//! ```

use crate::core::time::TimeManager;
use crate::durations::{DurationConfig, DurationError, DurationProvider};
use crate::models::agent::{Agent, AgentId, HealthStatus};
use crate::models::grid::{Cell, FloorPlan, GridError, TorusGrid};
use crate::rng::RngManager;
use crate::stats::{Aggregator, Snapshot};
use crate::transmission::{
    transmission_probability, CalibrationError, ContactRate, TransmissionModel,
};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

fn default_ticks_per_day() -> usize {
    1
}

/// Complete simulation configuration
///
/// Everything needed to construct a run. Validation happens once, at
/// construction time; invalid values are rejected with a descriptive error,
/// never clamped or defaulted.
///
/// # Fields
///
/// * `width`, `height` - Grid dimensions (toroidal, so no boundary exists)
/// * `population` - Total number of agents (N)
/// * `initial_infectious` - Agents seeded Infectious at tick 0 (i0 <= N)
/// * `r0` - Target basic reproduction number
/// * `contact_rate` - How the average per-tick contact count is obtained
/// * `ticks_per_day` - Scaling between ticks and calendar days
/// * `incubation`, `recovery` - Duration sampling strategies (in days)
/// * `probability_override` - Use this per-contact probability directly
///   instead of deriving it from `r0` (diagnostics and extreme-value runs)
/// * `calibration` - Run without transmission and record the empirical
///   contact estimator instead
/// * `floor_plan` - Optional walkability mask + entry coordinates; restricts
///   initial placement only
/// * `rng_seed` - Seed for the deterministic RNG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub population: usize,
    pub initial_infectious: usize,
    pub r0: f64,
    pub contact_rate: ContactRate,

    #[serde(default = "default_ticks_per_day")]
    pub ticks_per_day: usize,

    pub incubation: DurationConfig,
    pub recovery: DurationConfig,

    #[serde(default)]
    pub probability_override: Option<f64>,

    #[serde(default)]
    pub calibration: bool,

    #[serde(default)]
    pub floor_plan: Option<FloorPlan>,

    pub rng_seed: u64,
}

impl SimulationConfig {
    /// Parse a configuration from JSON
    ///
    /// # Example
    ///
    /// ```
    /// use epidemic_simulator_core_rs::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_json(
    ///     r#"{
    ///         "width": 40,
    ///         "height": 40,
    ///         "population": 1000,
    ///         "initial_infectious": 10,
    ///         "r0": 3.5,
    ///         "contact_rate": {"type": "measured", "value": 2.3},
    ///         "incubation": {"type": "fixed", "days": 5.0},
    ///         "recovery": {"type": "gamma", "shape": 5.8, "scale": 0.95},
    ///         "rng_seed": 42
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.population, 1000);
    /// assert_eq!(config.ticks_per_day, 1);
    /// assert!(!config.calibration);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SimulationConfig {
    /// The reference scenario: 1000 agents on a 40x40 torus, 10 initially
    /// infectious, R0 = 3.5, measured contact rate 2.3, five-day fixed
    /// incubation and recovery
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            population: 1000,
            initial_infectious: 10,
            r0: 3.5,
            contact_rate: ContactRate::Measured { value: 2.3 },
            ticks_per_day: 1,
            incubation: DurationConfig::Fixed { days: 5.0 },
            recovery: DurationConfig::Fixed { days: 5.0 },
            probability_override: None,
            calibration: false,
            floor_plan: None,
            rng_seed: 0,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration validation errors
///
/// Raised at construction time only; once an orchestrator exists, advancing
/// it cannot fail.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("Population must be positive")]
    EmptyPopulation,

    #[error("Initial infectious count {initial_infectious} exceeds population {population}")]
    TooManyInitialInfectious {
        initial_infectious: usize,
        population: usize,
    },

    #[error("ticks_per_day must be positive")]
    ZeroTicksPerDay,
}

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

// ============================================================================
// Tick result
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    /// Tick number (1-based: the first call to `tick()` yields 1)
    pub tick: usize,

    /// Population census after the tick completed
    pub snapshot: Snapshot,

    /// S -> E transitions that occurred this tick
    pub newly_exposed: usize,

    /// E -> I transitions that occurred this tick
    pub newly_infectious: usize,

    /// I -> R transitions that occurred this tick
    pub newly_recovered: usize,

    /// Empirical contact estimator; recorded in calibration runs only
    pub contact_mean: Option<f64>,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning the world grid, the agent roster, the clock,
/// the RNG and the snapshot history
///
/// # Determinism
///
/// All randomness flows through the seeded `RngManager`. Same seed + same
/// config = identical trajectory (states, positions, snapshots).
///
/// # Example
///
/// ```
/// use epidemic_simulator_core_rs::{Orchestrator, SimulationConfig};
///
/// let mut sim = Orchestrator::new(SimulationConfig {
///     rng_seed: 42,
///     ..SimulationConfig::default()
/// })
/// .unwrap();
///
/// for _ in 0..10 {
///     let result = sim.tick();
///     assert_eq!(result.snapshot.total(), 1000);
/// }
/// ```
pub struct Orchestrator {
    config: SimulationConfig,
    grid: TorusGrid,
    agents: Vec<Agent>,
    time: TimeManager,
    rng: RngManager,
    /// None in calibration runs: transmission is skipped outright
    transmission: Option<TransmissionModel>,
    aggregator: Aggregator,
}

impl Orchestrator {
    /// Create a new orchestrator from configuration
    ///
    /// Validates every parameter, derives the transmission probability,
    /// places the population (uniformly, or on the floor plan's entry
    /// coordinates when one is supplied), seeds `initial_infectious`
    /// randomly chosen agents as Infectious, and records the tick-0
    /// baseline snapshot.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfig` when any parameter is rejected:
    /// zero-area grid, empty population, `initial_infectious > population`,
    /// non-positive durations, or a derived probability outside `[0, 1]`.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::build(config).map_err(SimulationError::InvalidConfig)
    }

    fn build(config: SimulationConfig) -> Result<Self, ConfigError> {
        if config.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if config.initial_infectious > config.population {
            return Err(ConfigError::TooManyInitialInfectious {
                initial_infectious: config.initial_infectious,
                population: config.population,
            });
        }
        if config.ticks_per_day == 0 {
            return Err(ConfigError::ZeroTicksPerDay);
        }

        let mut grid = match &config.floor_plan {
            Some(plan) => TorusGrid::with_floor_plan(config.width, config.height, plan.clone())?,
            None => TorusGrid::new(config.width, config.height)?,
        };

        let incubation = config.incubation.build(config.ticks_per_day)?;
        let recovery = config.recovery.build(config.ticks_per_day)?;

        // Derive the per-contact probability unless this is a calibration
        // run (no transmission) or the caller supplied it directly.
        let transmission = if config.calibration {
            None
        } else {
            let p = match config.probability_override {
                Some(p) => p,
                None => {
                    let contacts =
                        config
                            .contact_rate
                            .resolve(config.population, config.width, config.height);
                    transmission_probability(config.r0, contacts, recovery.mean_ticks())?
                }
            };
            Some(TransmissionModel::new(p)?)
        };

        let mut rng = RngManager::new(config.rng_seed);

        // Which individuals start Infectious is randomized, not positional.
        // Calibration runs keep the whole population Susceptible.
        let seeded = if config.calibration {
            0
        } else {
            config.initial_infectious
        };
        let mut seed_infectious = vec![false; config.population];
        for flag in seed_infectious.iter_mut().take(seeded) {
            *flag = true;
        }
        rng.shuffle(&mut seed_infectious);

        let entries: Option<Vec<Cell>> = grid.entries().map(<[Cell]>::to_vec);
        let mut agents = Vec::with_capacity(config.population);
        for (id, &infectious) in seed_infectious.iter().enumerate() {
            let pos = match &entries {
                Some(doors) => doors[rng.pick_index(doors.len())],
                None => (
                    rng.pick_index(config.width),
                    rng.pick_index(config.height),
                ),
            };
            let incubation_ticks = incubation.sample_ticks(&mut rng);
            let recovery_ticks = recovery.sample_ticks(&mut rng);
            // Entry coordinates may wrap; the roster records the landed cell.
            let placed = grid.place(id, pos);
            let agent = if infectious {
                Agent::new_infectious(id, placed, incubation_ticks, recovery_ticks)
            } else {
                Agent::new(id, placed, incubation_ticks, recovery_ticks)
            };
            agents.push(agent);
        }

        info!(
            "SEIR simulation: population={} initial_infectious={} r0={} grid={}x{} \
             ticks_per_day={} p={:?} calibration={} seed={}",
            config.population,
            if config.calibration { 0 } else { config.initial_infectious },
            config.r0,
            config.width,
            config.height,
            config.ticks_per_day,
            transmission.as_ref().map(TransmissionModel::probability),
            config.calibration,
            config.rng_seed,
        );

        // Tick-0 baseline, before any agent has acted.
        let mut aggregator = Aggregator::new();
        aggregator.record(0, &agents);
        if config.calibration {
            aggregator.record_contact_mean(0, &grid);
        }

        let time = TimeManager::new(config.ticks_per_day);
        Ok(Self {
            config,
            grid,
            agents,
            time,
            rng,
            transmission,
            aggregator,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tick number
    pub fn current_tick(&self) -> usize {
        self.time.current_tick()
    }

    /// Current day number
    pub fn current_day(&self) -> usize {
        self.time.current_day()
    }

    /// The configuration this orchestrator was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The agent roster
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The world grid
    pub fn grid(&self) -> &TorusGrid {
        &self.grid
    }

    /// Per-contact transmission probability, `None` in calibration runs
    pub fn transmission_probability(&self) -> Option<f64> {
        self.transmission.map(|m| m.probability())
    }

    /// Full snapshot history, including the tick-0 baseline
    pub fn history(&self) -> &[Snapshot] {
        self.aggregator.history()
    }

    /// Most recent snapshot
    pub fn latest_snapshot(&self) -> &Snapshot {
        // Invariant: the baseline is recorded at construction, so the
        // history is never empty.
        self.aggregator
            .latest()
            .expect("baseline snapshot recorded at construction")
    }

    /// Recorded (tick, contact mean) pairs; non-empty in calibration runs
    pub fn contact_means(&self) -> &[(usize, f64)] {
        self.aggregator.contact_means()
    }

    // ========================================================================
    // Tick loop
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// Never fails: the grid wraps every coordinate into bounds and all
    /// parameters were validated at construction. The caller drives the run
    /// by invoking this repeatedly; there is no built-in termination
    /// condition.
    pub fn tick(&mut self) -> TickResult {
        // STEP 1: ADVANCE CLOCK
        // Agents evaluating during this pass observe the new tick value.
        self.time.advance_tick();
        let current_tick = self.time.current_tick();

        // STEP 2: ACTIVATION ORDER
        // Fresh uniformly random permutation; every agent exactly once.
        let mut order: Vec<AgentId> = (0..self.agents.len()).collect();
        self.rng.shuffle(&mut order);

        let mut newly_exposed = 0;
        let mut newly_infectious = 0;
        let mut newly_recovered = 0;

        // STEP 3: SEQUENTIAL AGENT EVALUATION
        for id in order {
            match self.agents[id].status() {
                HealthStatus::Exposed => {
                    if self.agents[id].incubation_elapsed(current_tick) {
                        self.agents[id].begin_infectious(current_tick);
                        newly_infectious += 1;
                        trace!("tick {current_tick}: agent {id} became infectious");
                    }
                }
                HealthStatus::Infectious => {
                    if let Some(model) = self.transmission {
                        newly_exposed += infect_neighborhood(
                            &self.grid,
                            &mut self.agents,
                            &mut self.rng,
                            model,
                            id,
                            current_tick,
                        );
                    }
                    if self.agents[id].recovery_elapsed(current_tick) {
                        self.agents[id].recover();
                        newly_recovered += 1;
                        trace!("tick {current_tick}: agent {id} recovered");
                    }
                }
                // Susceptible and Recovered agents only move.
                HealthStatus::Susceptible | HealthStatus::Recovered => {}
            }

            // STEP 4: RANDOM MOVE
            // Uniform choice over the Moore neighborhood, center included,
            // for every agent regardless of health state.
            let from = self.agents[id].pos();
            let moves = self.grid.neighborhood(from, true);
            let to = moves[self.rng.pick_index(moves.len())];
            let landed = self.grid.relocate(id, from, to);
            self.agents[id].set_pos(landed);
        }

        // STEP 5: AGGREGATE
        let snapshot = self.aggregator.record(current_tick, &self.agents);
        debug_assert_eq!(snapshot.total(), self.agents.len());

        let contact_mean = if self.config.calibration {
            Some(self.aggregator.record_contact_mean(current_tick, &self.grid))
        } else {
            None
        };

        debug!(
            "tick {current_tick}: S={} E={} I={} R={} (+{newly_exposed} exposed)",
            snapshot.susceptible, snapshot.exposed, snapshot.infectious, snapshot.recovered,
        );

        TickResult {
            tick: current_tick,
            snapshot,
            newly_exposed,
            newly_infectious,
            newly_recovered,
            contact_mean,
        }
    }
}

/// One infection attempt by `source` against its 9-cell Moore neighborhood
///
/// Every occupant currently Susceptible gets one independent Bernoulli
/// trial; successes transition to Exposed immediately, so a later infectious
/// agent in the same tick observes the target already Exposed and skips it.
/// Returns the number of new exposures.
fn infect_neighborhood(
    grid: &TorusGrid,
    agents: &mut [Agent],
    rng: &mut RngManager,
    model: TransmissionModel,
    source: AgentId,
    current_tick: usize,
) -> usize {
    let origin = agents[source].pos();
    let mut exposures = 0;
    for cell in grid.neighborhood(origin, true) {
        for &target in grid.occupants(cell) {
            if agents[target].status() == HealthStatus::Susceptible && model.attempt(rng) {
                agents[target].expose(current_tick);
                exposures += 1;
                trace!("tick {current_tick}: agent {source} exposed agent {target}");
            }
        }
    }
    exposures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population_rejected() {
        let config = SimulationConfig {
            population: 0,
            initial_infectious: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            Orchestrator::new(config).err(),
            Some(SimulationError::InvalidConfig(ConfigError::EmptyPopulation))
        );
    }

    #[test]
    fn test_initial_infectious_exceeding_population_rejected() {
        let config = SimulationConfig {
            population: 5,
            initial_infectious: 6,
            ..SimulationConfig::default()
        };
        assert_eq!(
            Orchestrator::new(config).err(),
            Some(SimulationError::InvalidConfig(
                ConfigError::TooManyInitialInfectious {
                    initial_infectious: 6,
                    population: 5,
                }
            ))
        );
    }

    #[test]
    fn test_zero_ticks_per_day_rejected() {
        let config = SimulationConfig {
            ticks_per_day: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            Orchestrator::new(config).err(),
            Some(SimulationError::InvalidConfig(ConfigError::ZeroTicksPerDay))
        );
    }

    #[test]
    fn test_zero_area_grid_rejected() {
        let config = SimulationConfig {
            width: 0,
            height: 40,
            ..SimulationConfig::default()
        };
        let err = Orchestrator::new(config).err();
        assert!(matches!(
            err,
            Some(SimulationError::InvalidConfig(ConfigError::Grid(
                GridError::ZeroArea { .. }
            )))
        ));
    }

    #[test]
    fn test_unreachable_r0_rejected() {
        // p = r0 / (c * Tr) = 100 / (2.3 * 5) > 1
        let config = SimulationConfig {
            r0: 100.0,
            ..SimulationConfig::default()
        };
        let err = Orchestrator::new(config).err();
        assert!(matches!(
            err,
            Some(SimulationError::InvalidConfig(ConfigError::Calibration(
                CalibrationError::ProbabilityOutOfRange { .. }
            )))
        ));
    }

    #[test]
    fn test_probability_override_bypasses_derivation() {
        // This r0 would be rejected if the probability were derived from it.
        let config = SimulationConfig {
            r0: 100.0,
            probability_override: Some(1.0),
            ..SimulationConfig::default()
        };
        let sim = Orchestrator::new(config).unwrap();
        assert_eq!(sim.transmission_probability(), Some(1.0));
    }

    #[test]
    fn test_derived_probability_matches_formula() {
        let sim = Orchestrator::new(SimulationConfig::default()).unwrap();
        let expected = 3.5 / (2.3 * 5.0);
        let p = sim.transmission_probability().unwrap();
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_initial_census() {
        let sim = Orchestrator::new(SimulationConfig::default()).unwrap();
        let baseline = sim.history()[0];
        assert_eq!(baseline.tick, 0);
        assert_eq!(baseline.susceptible, 990);
        assert_eq!(baseline.infectious, 10);
        assert_eq!(baseline.exposed, 0);
        assert_eq!(baseline.recovered, 0);
    }

    #[test]
    fn test_calibration_run_has_no_transmission_model() {
        let config = SimulationConfig {
            calibration: true,
            ..SimulationConfig::default()
        };
        let sim = Orchestrator::new(config).unwrap();
        assert_eq!(sim.transmission_probability(), None);
        assert_eq!(sim.history()[0].infectious, 0);
        assert_eq!(sim.history()[0].susceptible, 1000);
        assert_eq!(sim.contact_means().len(), 1);
    }
}
