// src/map/region.rs
// Flood-fill partition of a grid into 4-connected regions.

use std::collections::VecDeque;

use crate::map::{Cell, Coord, Grid};

/// A maximal orthogonally connected set of cells sharing one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub state: Cell,
    pub tiles: Vec<Coord>,
}

impl Region {
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// True if any tile lies on the outermost ring of `grid`.
    pub fn touches_edge(&self, grid: &Grid) -> bool {
        self.tiles
            .iter()
            .any(|t| grid.is_edge(t.x as usize, t.y as usize))
    }
}

pub struct RegionAnalyzer;

impl RegionAnalyzer {
    /// All regions of `state`, in the order their first tile is met while
    /// scanning the grid. Each cell is visited once across the whole scan.
    pub fn regions(grid: &Grid, state: Cell) -> Vec<Region> {
        let width = grid.width();
        let mut visited = vec![false; width * grid.height()];
        let mut regions = Vec::new();

        for (x, y, cell) in grid.scan() {
            if cell != state || visited[y * width + x] {
                continue;
            }
            regions.push(Self::flood(grid, Coord::new(x as i32, y as i32), &mut visited));
        }
        regions
    }

    fn flood(grid: &Grid, start: Coord, visited: &mut [bool]) -> Region {
        let width = grid.width() as i32;
        let state = grid.at(start);
        let mut tiles = Vec::new();
        let mut queue = VecDeque::new();

        visited[(start.y * width + start.x) as usize] = true;
        queue.push_back(start);

        while let Some(tile) = queue.pop_front() {
            tiles.push(tile);
            for next in tile.cross_neighbors() {
                if !grid.contains(next.x, next.y) {
                    continue;
                }
                let idx = (next.y * width + next.x) as usize;
                if !visited[idx] && grid.at(next) == state {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        Region { state, tiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        // Rows are given top to bottom; '#' is wall.
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Grid::new(width, height, Cell::Empty);
        for (row, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set(x, height - 1 - row, Cell::Wall);
                }
            }
        }
        grid
    }

    #[test]
    fn test_diagonal_cells_are_separate_regions() {
        let grid = grid_from_rows(&["#.", ".#"]);
        let walls = RegionAnalyzer::regions(&grid, Cell::Wall);
        assert_eq!(walls.len(), 2);
        assert!(walls.iter().all(|r| r.size() == 1));
    }

    #[test]
    fn test_regions_partition_cells() {
        let grid = grid_from_rows(&[
            "########",
            "#..#...#",
            "#..#.#.#",
            "####.#.#",
            "#....#.#",
            "########",
        ]);
        for state in [Cell::Empty, Cell::Wall] {
            let regions = RegionAnalyzer::regions(&grid, state);
            let mut seen = HashSet::new();
            for region in &regions {
                assert_eq!(region.state, state);
                for tile in &region.tiles {
                    assert!(seen.insert(*tile), "tile {:?} in two regions", tile);
                }
            }
            assert_eq!(seen.len(), grid.count(state));
        }
    }

    #[test]
    fn test_region_discovery_order() {
        let grid = grid_from_rows(&["#####", "#.#.#", "#####"]);
        let rooms = RegionAnalyzer::regions(&grid, Cell::Empty);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].tiles, vec![Coord::new(1, 1)]);
        assert_eq!(rooms[1].tiles, vec![Coord::new(3, 1)]);
    }

    #[test]
    fn test_touches_edge() {
        let grid = grid_from_rows(&["#####", "#.#.#", "#####"]);
        let walls = RegionAnalyzer::regions(&grid, Cell::Wall);
        assert_eq!(walls.len(), 1);
        assert!(walls[0].touches_edge(&grid));
        let rooms = RegionAnalyzer::regions(&grid, Cell::Empty);
        assert!(!rooms[0].touches_edge(&grid));
    }
}
