// src/map/grid.rs
// Cell grid shared by every stage of map generation.

use serde::Serialize;

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// Integer position in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Widened to `i64` so maps tens of thousands of cells across cannot overflow.
    pub fn distance_squared(&self, other: &Coord) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// The four orthogonal neighbours, in the order the region scans visit them.
    pub fn cross_neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x, self.y - 1),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x + 1, self.y),
        ]
    }
}

/// A fixed-size 2D map of cells, indexed `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Grid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Cell at a signed position; anything outside the grid reads as Wall.
    pub fn get_or_wall(&self, x: i32, y: i32) -> Cell {
        if self.contains(x, y) {
            self.get(x as usize, y as usize)
        } else {
            Cell::Wall
        }
    }

    pub fn at(&self, coord: Coord) -> Cell {
        self.get_or_wall(coord.x, coord.y)
    }

    /// Set a cell by coordinate, ignoring positions outside the grid.
    pub fn set_at(&mut self, coord: Coord, cell: Cell) {
        if self.contains(coord.x, coord.y) {
            self.set(coord.x as usize, coord.y as usize, cell);
        }
    }

    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Number of wall cells among the 8 neighbours of `(x, y)`.
    /// Out-of-bounds neighbours count as walls.
    pub fn surrounding_wall_count(&self, x: usize, y: usize) -> u32 {
        let (x, y) = (x as i32, y as i32);
        let mut count = 0;
        for nx in x - 1..=x + 1 {
            for ny in y - 1..=y + 1 {
                if (nx != x || ny != y) && self.get_or_wall(nx, ny).is_wall() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Iterate over every cell in scan order (x outer, y inner).
    pub fn scan(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| (x, y, self.get(x, y))))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Copy of this grid framed by `border_size` rings of wall on every side.
    pub fn with_border(&self, border_size: usize) -> Grid {
        let width = self.width + border_size * 2;
        let height = self.height + border_size * 2;
        let mut bordered = Grid::new(width, height, Cell::Wall);
        for (x, y, cell) in self.scan() {
            bordered.set(x + border_size, y + border_size, cell);
        }
        bordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = Grid::new(3, 3, Cell::Empty);
        assert_eq!(grid.get_or_wall(-1, 0), Cell::Wall);
        assert_eq!(grid.get_or_wall(0, 3), Cell::Wall);
        assert_eq!(grid.get_or_wall(1, 1), Cell::Empty);
    }

    #[test]
    fn test_surrounding_wall_count_at_corner() {
        // Five of the corner's neighbours lie outside the grid.
        let grid = Grid::new(4, 4, Cell::Empty);
        assert_eq!(grid.surrounding_wall_count(0, 0), 5);
        assert_eq!(grid.surrounding_wall_count(1, 1), 0);
    }

    #[test]
    fn test_with_border_dimensions_and_rings() {
        let grid = Grid::new(4, 3, Cell::Empty);
        let bordered = grid.with_border(2);
        assert_eq!(bordered.width(), 8);
        assert_eq!(bordered.height(), 7);
        for (x, y, cell) in bordered.scan() {
            let inside = (2..6).contains(&x) && (2..5).contains(&y);
            assert_eq!(cell == Cell::Empty, inside, "cell ({}, {})", x, y);
        }
    }

    #[test]
    fn test_zero_border_is_identity() {
        let mut grid = Grid::new(3, 3, Cell::Empty);
        grid.set(1, 2, Cell::Wall);
        assert_eq!(grid.with_border(0), grid);
    }

    #[test]
    fn test_scan_order_is_x_major() {
        let grid = Grid::new(2, 2, Cell::Empty);
        let order: Vec<(usize, usize)> = grid.scan().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
