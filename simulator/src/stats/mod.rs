//! Per-tick population statistics
//!
//! After each completed tick the aggregator counts agents per health state
//! in one O(N) pass and appends an immutable snapshot to its history. In
//! calibration runs it additionally records the empirical contact-rate
//! estimator: the mean, over all occupied cells, of the total number of
//! occupants found in each cell's 9-cell Moore neighborhood.

use crate::models::agent::{Agent, HealthStatus};
use crate::models::grid::TorusGrid;
use serde::{Deserialize, Serialize};

/// Aggregate population counts for one tick
///
/// Immutable once appended; `susceptible + exposed + infectious + recovered`
/// always equals the population size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick this census was taken at
    pub tick: usize,
    pub susceptible: usize,
    pub exposed: usize,
    pub infectious: usize,
    pub recovered: usize,
}

impl Snapshot {
    /// Total population covered by this snapshot
    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.infectious + self.recovered
    }
}

/// Census one roster of agents at `tick`
pub fn census(tick: usize, agents: &[Agent]) -> Snapshot {
    let mut snapshot = Snapshot {
        tick,
        susceptible: 0,
        exposed: 0,
        infectious: 0,
        recovered: 0,
    };
    for agent in agents {
        match agent.status() {
            HealthStatus::Susceptible => snapshot.susceptible += 1,
            HealthStatus::Exposed => snapshot.exposed += 1,
            HealthStatus::Infectious => snapshot.infectious += 1,
            HealthStatus::Recovered => snapshot.recovered += 1,
        }
    }
    snapshot
}

/// Empirical contact-rate estimator
///
/// For every cell holding at least one agent, count the total occupants in
/// its Moore neighborhood (center included), then average those totals over
/// the occupied cells. Returns 0.0 for an empty grid.
///
/// This is the quantity a calibration run measures to obtain the contact
/// rate `c` fed back into the probability derivation.
pub fn mean_neighborhood_occupancy(grid: &TorusGrid) -> f64 {
    let mut total = 0usize;
    let mut occupied = 0usize;
    for (cell, _) in grid.occupied_cells() {
        let in_neighborhood: usize = grid
            .neighborhood(cell, true)
            .into_iter()
            .map(|c| grid.occupant_count(c))
            .sum();
        total += in_neighborhood;
        occupied += 1;
    }
    if occupied == 0 {
        0.0
    } else {
        total as f64 / occupied as f64
    }
}

/// Append-only history of per-tick snapshots
///
/// Owned by the orchestrator; external consumers read `history()` or
/// `latest()` after each tick and export/accumulate as they see fit.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    history: Vec<Snapshot>,
    contact_means: Vec<(usize, f64)>,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Census the roster and append the snapshot
    pub fn record(&mut self, tick: usize, agents: &[Agent]) -> Snapshot {
        let snapshot = census(tick, agents);
        self.history.push(snapshot);
        snapshot
    }

    /// Record the empirical contact estimator for a calibration run
    pub fn record_contact_mean(&mut self, tick: usize, grid: &TorusGrid) -> f64 {
        let mean = mean_neighborhood_occupancy(grid);
        self.contact_means.push((tick, mean));
        mean
    }

    /// Full snapshot history, ordered by tick
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Most recent snapshot, if any tick has completed
    pub fn latest(&self) -> Option<&Snapshot> {
        self.history.last()
    }

    /// Recorded (tick, contact mean) pairs from calibration runs
    pub fn contact_means(&self) -> &[(usize, f64)] {
        &self.contact_means
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::Agent;

    #[test]
    fn test_census_counts_all_states() {
        let mut agents = vec![
            Agent::new(0, (0, 0), 1, 1),
            Agent::new(1, (0, 0), 1, 1),
            Agent::new_infectious(2, (0, 0), 1, 1),
        ];
        agents[1].expose(3);
        let snapshot = census(3, &agents);
        assert_eq!(snapshot.susceptible, 1);
        assert_eq!(snapshot.exposed, 1);
        assert_eq!(snapshot.infectious, 1);
        assert_eq!(snapshot.recovered, 0);
        assert_eq!(snapshot.total(), 3);
    }

    #[test]
    fn test_mean_neighborhood_occupancy_isolated_agents() {
        // Two agents far apart on a big grid: each occupied cell sees
        // exactly one occupant in its neighborhood
        let mut grid = TorusGrid::new(20, 20).unwrap();
        grid.place(0, (0, 0));
        grid.place(1, (10, 10));
        assert_eq!(mean_neighborhood_occupancy(&grid), 1.0);
    }

    #[test]
    fn test_mean_neighborhood_occupancy_shared_cell() {
        let mut grid = TorusGrid::new(20, 20).unwrap();
        grid.place(0, (5, 5));
        grid.place(1, (5, 5));
        // One occupied cell, two occupants in its neighborhood
        assert_eq!(mean_neighborhood_occupancy(&grid), 2.0);
    }

    #[test]
    fn test_mean_neighborhood_occupancy_adjacent_cells() {
        let mut grid = TorusGrid::new(20, 20).unwrap();
        grid.place(0, (5, 5));
        grid.place(1, (6, 5));
        // Each of the two occupied cells sees both agents
        assert_eq!(mean_neighborhood_occupancy(&grid), 2.0);
    }

    #[test]
    fn test_empty_grid_mean_is_zero() {
        let grid = TorusGrid::new(5, 5).unwrap();
        assert_eq!(mean_neighborhood_occupancy(&grid), 0.0);
    }

    #[test]
    fn test_history_is_append_only_ordered() {
        let agents = vec![Agent::new(0, (0, 0), 1, 1)];
        let mut aggregator = Aggregator::new();
        aggregator.record(0, &agents);
        aggregator.record(1, &agents);
        aggregator.record(2, &agents);
        let ticks: Vec<usize> = aggregator.history().iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!(aggregator.latest().unwrap().tick, 2);
    }
}
