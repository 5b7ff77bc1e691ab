//! Toroidal world grid
//!
//! A bounded W x H grid whose edges wrap around (topologically a torus), so
//! every computed coordinate is valid and contact statistics are uniform
//! near the "edges". Cells have unbounded occupancy: any number of agents
//! may share one cell.
//!
//! The grid can optionally carry an externally supplied floor plan: a
//! per-cell building/passage category plus a list of entry coordinates
//! ("doors"). The engine uses entries only to restrict initial placement;
//! movement itself is never constrained by the plan.

use crate::models::agent::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A cell coordinate, always in `[0, width) x [0, height)` after wraparound
pub type Cell = (usize, usize);

/// Errors raised when constructing a grid or floor plan
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid must have positive area: got {width}x{height}")]
    ZeroArea { width: usize, height: usize },

    #[error("Floor plan is {plan_width}x{plan_height} but grid is {width}x{height}")]
    PlanDimensionMismatch {
        width: usize,
        height: usize,
        plan_width: usize,
        plan_height: usize,
    },

    #[error("Floor plan rows must all have the same length")]
    RaggedPlan,

    #[error("Floor plan must declare at least one entry coordinate")]
    NoEntryCoordinates,
}

/// Category of one floor-plan cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Interior of a building; not walkable
    Building,
    /// Street / avenue; walkable
    Passage,
}

/// Externally supplied walkability mask plus entry coordinates
///
/// `kinds` is row-major: `kinds[y][x]`. Entries are the coordinates where
/// agents may be placed initially (the "doors" of the buildings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    kinds: Vec<Vec<CellKind>>,
    entries: Vec<Cell>,
}

impl FloorPlan {
    /// Create a floor plan from a rectangular category mask and entry list
    ///
    /// # Errors
    /// - `GridError::ZeroArea` if the mask is empty
    /// - `GridError::RaggedPlan` if rows differ in length
    /// - `GridError::NoEntryCoordinates` if `entries` is empty
    pub fn new(kinds: Vec<Vec<CellKind>>, entries: Vec<Cell>) -> Result<Self, GridError> {
        let height = kinds.len();
        let width = kinds.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::ZeroArea { width, height });
        }
        if kinds.iter().any(|row| row.len() != width) {
            return Err(GridError::RaggedPlan);
        }
        if entries.is_empty() {
            return Err(GridError::NoEntryCoordinates);
        }
        Ok(Self { kinds, entries })
    }

    /// Mask width in cells
    pub fn width(&self) -> usize {
        self.kinds[0].len()
    }

    /// Mask height in cells
    pub fn height(&self) -> usize {
        self.kinds.len()
    }

    /// Entry coordinates usable for initial placement
    pub fn entries(&self) -> &[Cell] {
        &self.entries
    }

    fn kind_at(&self, (x, y): Cell) -> CellKind {
        self.kinds[y][x]
    }
}

/// Bounded 2-D grid with periodic wraparound and multi-occupancy cells
///
/// # Example
/// ```
/// use epidemic_simulator_core_rs::TorusGrid;
///
/// let mut grid = TorusGrid::new(10, 10).unwrap();
/// grid.place(0, (9, 0));
///
/// // Moving one step in +x from the right edge wraps to x = 0
/// let landed = grid.relocate(0, (9, 0), (10, 0));
/// assert_eq!(landed, (0, 0));
/// assert_eq!(grid.occupants((0, 0)), &[0]);
/// ```
#[derive(Debug, Clone)]
pub struct TorusGrid {
    width: usize,
    height: usize,
    /// Cell -> ids of agents currently in it. Vecs keep insertion order so
    /// occupant enumeration is deterministic for a given trajectory.
    occupancy: HashMap<Cell, Vec<AgentId>>,
    floor_plan: Option<FloorPlan>,
}

impl TorusGrid {
    /// Create an empty grid
    ///
    /// # Errors
    /// `GridError::ZeroArea` if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroArea { width, height });
        }
        Ok(Self {
            width,
            height,
            occupancy: HashMap::new(),
            floor_plan: None,
        })
    }

    /// Create an empty grid carrying a floor plan
    ///
    /// # Errors
    /// `GridError::PlanDimensionMismatch` if the plan does not cover the
    /// grid exactly, plus the `TorusGrid::new` errors.
    pub fn with_floor_plan(
        width: usize,
        height: usize,
        plan: FloorPlan,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        if plan.width() != width || plan.height() != height {
            return Err(GridError::PlanDimensionMismatch {
                width,
                height,
                plan_width: plan.width(),
                plan_height: plan.height(),
            });
        }
        grid.floor_plan = Some(plan);
        Ok(grid)
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Wrap a signed coordinate pair onto the torus
    ///
    /// # Example
    /// ```
    /// use epidemic_simulator_core_rs::TorusGrid;
    ///
    /// let grid = TorusGrid::new(40, 40).unwrap();
    /// assert_eq!(grid.normalize((-1, 40)), (39, 0));
    /// ```
    pub fn normalize(&self, (x, y): (i64, i64)) -> Cell {
        let w = self.width as i64;
        let h = self.height as i64;
        (x.rem_euclid(w) as usize, y.rem_euclid(h) as usize)
    }

    /// The Moore neighborhood of a cell: the 8 adjacent cells (9 when
    /// `include_center`), each wrapped onto the torus
    ///
    /// On grids smaller than 3x3 some wrapped neighbors coincide; duplicates
    /// are removed so each distinct cell appears once. The returned order is
    /// fixed (row-major over offsets), which keeps move selection and contact
    /// enumeration deterministic.
    pub fn neighborhood(&self, (x, y): Cell, include_center: bool) -> Vec<Cell> {
        let mut cells: Vec<Cell> = Vec::with_capacity(9);
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                let cell = self.normalize((x as i64 + dx, y as i64 + dy));
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Insert an agent into the occupancy set at `pos` (wrapped)
    ///
    /// Returns the wrapped cell the agent was placed in.
    pub fn place(&mut self, agent: AgentId, pos: Cell) -> Cell {
        let cell = self.normalize((pos.0 as i64, pos.1 as i64));
        self.occupancy.entry(cell).or_default().push(agent);
        cell
    }

    /// Move an agent from `from` to `to` (wrapped)
    ///
    /// Returns the wrapped destination cell.
    pub fn relocate(&mut self, agent: AgentId, from: Cell, to: Cell) -> Cell {
        let old = self.normalize((from.0 as i64, from.1 as i64));
        if let Some(ids) = self.occupancy.get_mut(&old) {
            if let Some(i) = ids.iter().position(|&id| id == agent) {
                ids.remove(i);
            }
            if ids.is_empty() {
                self.occupancy.remove(&old);
            }
        }
        self.place(agent, to)
    }

    /// Agents currently occupying `pos` (possibly empty), in insertion order
    pub fn occupants(&self, pos: Cell) -> &[AgentId] {
        self.occupancy.get(&pos).map_or(&[], Vec::as_slice)
    }

    /// Number of agents in `pos`
    pub fn occupant_count(&self, pos: Cell) -> usize {
        self.occupants(pos).len()
    }

    /// Iterate over all cells that currently hold at least one agent
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, &[AgentId])> {
        self.occupancy
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(&cell, ids)| (cell, ids.as_slice()))
    }

    /// Whether `pos` is walkable under the floor plan (always true without one)
    pub fn is_walkable(&self, pos: Cell) -> bool {
        match &self.floor_plan {
            Some(plan) => plan.kind_at(pos) == CellKind::Passage,
            None => true,
        }
    }

    /// Entry coordinates of the floor plan, if one was supplied
    pub fn entries(&self) -> Option<&[Cell]> {
        self.floor_plan.as_ref().map(FloorPlan::entries)
    }
}
