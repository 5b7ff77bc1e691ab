//! Epidemic Simulator Core - Rust Engine
//!
//! Agent-based SEIR epidemic simulator on a toroidal multi-occupancy grid,
//! with deterministic execution and reproduction-number calibration.
//!
//! # Architecture
//!
//! - **core**: Time management (ticks, ticks-per-day scaling)
//! - **models**: Domain types (TorusGrid, Agent, HealthStatus)
//! - **durations**: Incubation/recovery duration providers (fixed or sampled)
//! - **transmission**: Per-contact infection probability and calibration
//! - **stats**: Per-tick population census and calibration diagnostics
//! - **orchestrator**: Main simulation loop (randomized activation)
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG); same seed + same config
//!    reproduces the full trajectory
//! 2. Health states only move forward: S -> E -> I -> R
//! 3. Every snapshot conserves the population: S + E + I + R == N

// Module declarations
pub mod core;
pub mod durations;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod stats;
pub mod transmission;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use durations::{
    DurationConfig, DurationError, DurationProvider, FixedDurations, SampledDurations,
};
pub use models::{
    agent::{Agent, AgentId, HealthStatus},
    grid::{Cell, CellKind, FloorPlan, GridError, TorusGrid},
};
pub use orchestrator::{ConfigError, Orchestrator, SimulationConfig, SimulationError, TickResult};
pub use rng::RngManager;
pub use stats::{mean_neighborhood_occupancy, Aggregator, Snapshot};
pub use transmission::{
    analytic_contact_rate, transmission_probability, CalibrationError, ContactRate,
    TransmissionModel,
};
