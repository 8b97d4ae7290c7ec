//! `Path` — a single realisation of a 1-D process on a time grid.

use super::time_grid::TimeGrid;
use mcp_core::{Real, Time};

/// A sample path: one value per point of its time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    time_grid: TimeGrid,
    values: Vec<Real>,
}

impl Path {
    /// A path on `time_grid` with every value set to zero.
    pub fn new(time_grid: TimeGrid) -> Self {
        let values = vec![0.0; time_grid.size()];
        Self { time_grid, values }
    }

    /// Number of points (= steps + 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path has no points. Never true for a path built on a
    /// valid grid.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The initial value.
    pub fn front(&self) -> Real {
        self.values[0]
    }

    /// The final value.
    pub fn back(&self) -> Real {
        self.values[self.values.len() - 1]
    }

    /// Value at point `i`.
    pub fn value(&self, i: usize) -> Real {
        self.values[i]
    }

    /// Time at point `i`.
    pub fn time(&self, i: usize) -> Time {
        self.time_grid.time(i)
    }

    /// All values.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Mutable access to the values.
    pub fn values_mut(&mut self) -> &mut [Real] {
        &mut self.values
    }

    /// The underlying time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.time_grid
    }
}
