//! Simulation orchestrator
//!
//! Owns all simulation state and drives the tick loop: randomized agent
//! activation, SEIR state evaluation, transmission, movement, aggregation.

mod engine;

pub use engine::{
    ConfigError, Orchestrator, SimulationConfig, SimulationError, TickResult,
};
