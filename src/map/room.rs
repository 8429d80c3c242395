// src/map/room.rs

use log::debug;

use crate::error::{CaveError, Result};
use crate::map::{Cell, Coord, Grid, RegionAnalyzer};

/// Regions smaller than this are treated as noise by default.
pub const DEFAULT_WALL_THRESHOLD: usize = 50;
pub const DEFAULT_ROOM_THRESHOLD: usize = 50;

/// A floor region that survived aberration removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub tiles: Vec<Coord>,
    /// Tiles with a wall (or the map edge) directly above, below, left or right.
    pub edge_tiles: Vec<Coord>,
    /// Indices of connected rooms in the owning room list.
    pub connected: Vec<usize>,
    pub is_main_room: bool,
    pub is_accessible_from_main_room: bool,
}

impl Room {
    pub fn new(tiles: Vec<Coord>, grid: &Grid) -> Self {
        let edge_tiles = tiles
            .iter()
            .copied()
            .filter(|tile| {
                tile.cross_neighbors()
                    .iter()
                    .any(|n| grid.at(*n).is_wall())
            })
            .collect();

        Room {
            tiles,
            edge_tiles,
            connected: Vec::new(),
            is_main_room: false,
            is_accessible_from_main_room: false,
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_connected(&self, other: usize) -> bool {
        self.connected.contains(&other)
    }
}

/// Removes wall specks and tiny pockets, then promotes the surviving floor
/// regions to rooms.
#[derive(Debug, Clone, Copy)]
pub struct AberrationRemover {
    pub wall_threshold: usize,
    pub room_threshold: usize,
}

impl Default for AberrationRemover {
    fn default() -> Self {
        AberrationRemover {
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            room_threshold: DEFAULT_ROOM_THRESHOLD,
        }
    }
}

impl AberrationRemover {
    pub fn new(wall_threshold: usize, room_threshold: usize) -> Self {
        AberrationRemover { wall_threshold, room_threshold }
    }

    /// Returns the rooms sorted by size, largest first, with the largest
    /// flagged as the main room.
    pub fn apply(&self, grid: &mut Grid) -> Result<Vec<Room>> {
        let mut dissolved_walls = 0;
        for region in RegionAnalyzer::regions(grid, Cell::Wall) {
            // The outer frame is never dissolved, whatever its size.
            if region.size() >= self.wall_threshold || region.touches_edge(grid) {
                continue;
            }
            for tile in &region.tiles {
                grid.set_at(*tile, Cell::Empty);
            }
            dissolved_walls += 1;
        }

        let mut filled_pockets = 0;
        let mut rooms = Vec::new();
        for region in RegionAnalyzer::regions(grid, Cell::Empty) {
            if region.size() < self.room_threshold {
                for tile in &region.tiles {
                    grid.set_at(*tile, Cell::Wall);
                }
                filled_pockets += 1;
            } else {
                rooms.push(Room::new(region.tiles, grid));
            }
        }
        debug!(
            "Aberration removal: {} wall specks dissolved, {} pockets filled, {} rooms kept",
            dissolved_walls,
            filled_pockets,
            rooms.len()
        );

        // Stable sort, so equal sizes keep discovery order.
        rooms.sort_by(|a, b| b.size().cmp(&a.size()));

        let main = rooms.first_mut().ok_or(CaveError::NoRooms)?;
        main.is_main_room = true;
        main.is_accessible_from_main_room = true;
        Ok(rooms)
    }
}
