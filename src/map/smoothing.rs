// src/map/smoothing.rs

use crate::map::{Cell, Grid};

/// Wall count at which a cell keeps its current state.
const NEIGHBOUR_BALANCE: u32 = 4;

/// Majority-rule cellular automaton used to turn noise into caves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellularAutomatonSmoother {
    pub iterations: usize,
}

impl CellularAutomatonSmoother {
    pub fn new(iterations: usize) -> Self {
        CellularAutomatonSmoother { iterations }
    }

    pub fn smooth(&self, grid: Grid) -> Grid {
        (0..self.iterations).fold(grid, |current, _| Self::step(&current))
    }

    /// One pass. Reads only from `grid` and writes into a fresh buffer.
    pub fn step(grid: &Grid) -> Grid {
        let mut next = grid.clone();
        for (x, y, cell) in grid.scan() {
            let walls = grid.surrounding_wall_count(x, y);
            let updated = if walls > NEIGHBOUR_BALANCE {
                Cell::Wall
            } else if walls < NEIGHBOUR_BALANCE {
                Cell::Empty
            } else {
                cell
            };
            next.set(x, y, updated);
        }
        next
    }
}
