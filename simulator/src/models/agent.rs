//! Agent (individual) model
//!
//! One simulated individual: a position on the grid, an SEIR health state,
//! and the timestamps needed to evaluate state transitions. Agents are kept
//! in a dense roster vector owned by the orchestrator; `AgentId` is the
//! index into that roster and is stable for the agent's lifetime.
//!
//! Health states only move forward: Susceptible -> Exposed -> Infectious ->
//! Recovered. Recovered is terminal. The mutators below are the only way to
//! change state and each asserts the expected predecessor, so a regression
//! is unreachable by construction.

use crate::models::grid::Cell;
use serde::{Deserialize, Serialize};

/// Index of an agent in the roster; unique and stable for its lifetime
pub type AgentId = usize;

/// SEIR compartment of one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Can be exposed by contact with an infectious agent
    Susceptible,
    /// Carries the infection but is not yet contagious
    Exposed,
    /// Contagious; attempts transmission against its neighborhood each tick
    Infectious,
    /// Terminal: no further state changes ever occur
    Recovered,
}

/// One simulated individual
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::{Agent, HealthStatus};
///
/// let mut agent = Agent::new(0, (3, 4), 10, 25);
/// assert_eq!(agent.status(), HealthStatus::Susceptible);
///
/// agent.expose(7);
/// assert_eq!(agent.status(), HealthStatus::Exposed);
/// assert_eq!(agent.exposed_at(), Some(7));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    pos: Cell,
    status: HealthStatus,
    /// Tick of the S -> E transition
    exposed_at: Option<usize>,
    /// Tick of the E -> I transition (or 0 for agents seeded Infectious)
    infected_at: Option<usize>,
    /// Incubation duration in ticks, fixed at creation
    incubation_ticks: usize,
    /// Recovery duration in ticks, fixed at creation
    recovery_ticks: usize,
}

impl Agent {
    /// Create a susceptible agent
    pub fn new(id: AgentId, pos: Cell, incubation_ticks: usize, recovery_ticks: usize) -> Self {
        Self {
            id,
            pos,
            status: HealthStatus::Susceptible,
            exposed_at: None,
            infected_at: None,
            incubation_ticks,
            recovery_ticks,
        }
    }

    /// Create an agent seeded Infectious at simulation start
    ///
    /// `infected_at` is tick 0, so with recovery duration D the agent
    /// recovers on the first tick strictly greater than D.
    pub fn new_infectious(
        id: AgentId,
        pos: Cell,
        incubation_ticks: usize,
        recovery_ticks: usize,
    ) -> Self {
        Self {
            id,
            pos,
            status: HealthStatus::Infectious,
            exposed_at: None,
            infected_at: Some(0),
            incubation_ticks,
            recovery_ticks,
        }
    }

    /// Agent identifier
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Current cell (always in bounds, wraparound guarantees it)
    pub fn pos(&self) -> Cell {
        self.pos
    }

    /// Record a new position after a move
    pub fn set_pos(&mut self, pos: Cell) {
        self.pos = pos;
    }

    /// Current health state
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Tick of the S -> E transition, if it happened
    pub fn exposed_at(&self) -> Option<usize> {
        self.exposed_at
    }

    /// Tick of the E -> I transition, if it happened
    pub fn infected_at(&self) -> Option<usize> {
        self.infected_at
    }

    /// Incubation duration in ticks
    pub fn incubation_ticks(&self) -> usize {
        self.incubation_ticks
    }

    /// Recovery duration in ticks
    pub fn recovery_ticks(&self) -> usize {
        self.recovery_ticks
    }

    /// S -> E: record the exposure immediately
    ///
    /// Takes effect the moment an infection attempt succeeds, not at end of
    /// tick; later infectious agents in the same tick observe the new state
    /// and skip this agent.
    pub fn expose(&mut self, current_tick: usize) {
        debug_assert_eq!(self.status, HealthStatus::Susceptible);
        self.status = HealthStatus::Exposed;
        self.exposed_at = Some(current_tick);
    }

    /// E -> I: incubation is over, the agent becomes contagious
    pub fn begin_infectious(&mut self, current_tick: usize) {
        debug_assert_eq!(self.status, HealthStatus::Exposed);
        self.status = HealthStatus::Infectious;
        self.infected_at = Some(current_tick);
    }

    /// I -> R: terminal
    pub fn recover(&mut self) {
        debug_assert_eq!(self.status, HealthStatus::Infectious);
        self.status = HealthStatus::Recovered;
    }

    /// Whether the incubation period has elapsed at `current_tick`
    ///
    /// True when strictly more than `incubation_ticks` ticks have passed
    /// since exposure. False when the agent was never exposed.
    pub fn incubation_elapsed(&self, current_tick: usize) -> bool {
        match self.exposed_at {
            Some(t) => current_tick.saturating_sub(t) > self.incubation_ticks,
            None => false,
        }
    }

    /// Whether the infectious period has elapsed at `current_tick`
    pub fn recovery_elapsed(&self, current_tick: usize) -> bool {
        match self.infected_at {
            Some(t) => current_tick.saturating_sub(t) > self.recovery_ticks,
            None => false,
        }
    }
}
