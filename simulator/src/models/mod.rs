//! Domain models
//!
//! - `grid`: toroidal multi-occupancy world grid with optional floor plan
//! - `agent`: one simulated individual and its SEIR health state

pub mod agent;
pub mod grid;

pub use agent::{Agent, AgentId, HealthStatus};
pub use grid::{Cell, CellKind, FloorPlan, GridError, TorusGrid};
