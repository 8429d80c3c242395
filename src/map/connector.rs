// src/map/connector.rs
// Joins rooms with carved passages until every room is reachable from the main room.

use log::debug;
use serde::Serialize;

use crate::map::{Cell, Coord, Grid, Room};

/// A passage carved between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Passage {
    pub room_a: usize,
    pub room_b: usize,
    pub from: Coord,
    pub to: Coord,
}

/// Closest edge-tile pair found by a scan.
#[derive(Debug, Clone, Copy)]
struct Link {
    room_a: usize,
    room_b: usize,
    tile_a: Coord,
    tile_b: Coord,
    distance: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoomConnector {
    /// Radius of the disk stamped around every point of a passage line.
    pub connection_radius: i32,
}

impl RoomConnector {
    pub fn new(connection_radius: i32) -> Self {
        RoomConnector { connection_radius }
    }

    /// Connect `rooms` (sorted, main room first) and carve the passages into `grid`.
    pub fn connect(&self, grid: &mut Grid, rooms: &mut [Room]) -> Vec<Passage> {
        let mut passages = Vec::new();
        self.connect_nearest(grid, rooms, &mut passages);
        self.connect_to_main(grid, rooms, &mut passages);
        passages
    }

    /// Every room that has no connection yet is joined to its nearest neighbour.
    fn connect_nearest(&self, grid: &mut Grid, rooms: &mut [Room], passages: &mut Vec<Passage>) {
        for a in 0..rooms.len() {
            if !rooms[a].connected.is_empty() {
                continue;
            }
            let candidates = (0..rooms.len())
                .filter(|&b| b != a && !rooms[a].is_connected(b))
                .map(|b| (a, b));
            if let Some(link) = closest_link(rooms, candidates) {
                passages.push(self.create_passage(grid, rooms, link));
            }
        }
    }

    /// Repeatedly joins the closest inaccessible/accessible pair until none is left.
    fn connect_to_main(&self, grid: &mut Grid, rooms: &mut [Room], passages: &mut Vec<Passage>) {
        loop {
            let unreached: Vec<usize> = (0..rooms.len())
                .filter(|&i| !rooms[i].is_accessible_from_main_room)
                .collect();
            let reached: Vec<usize> = (0..rooms.len())
                .filter(|&i| rooms[i].is_accessible_from_main_room)
                .collect();

            let candidates = unreached
                .iter()
                .flat_map(|&a| reached.iter().map(move |&b| (a, b)))
                .filter(|&(a, b)| !rooms[a].is_connected(b));
            match closest_link(rooms, candidates) {
                Some(link) => passages.push(self.create_passage(grid, rooms, link)),
                None => break,
            }
        }
    }

    fn create_passage(&self, grid: &mut Grid, rooms: &mut [Room], link: Link) -> Passage {
        connect_rooms(rooms, link.room_a, link.room_b);
        debug!(
            "Passage {} -> {} from {:?} to {:?} (distance² {})",
            link.room_a, link.room_b, link.tile_a, link.tile_b, link.distance
        );

        for point in line(link.tile_a, link.tile_b) {
            carve_disk(grid, point, self.connection_radius);
        }
        Passage {
            room_a: link.room_a,
            room_b: link.room_b,
            from: link.tile_a,
            to: link.tile_b,
        }
    }
}

/// Scans every edge-tile pair of the candidate room pairs in order. The strictly
/// smallest squared distance wins, so the first pair found wins ties.
fn closest_link(rooms: &[Room], candidates: impl Iterator<Item = (usize, usize)>) -> Option<Link> {
    let mut best: Option<Link> = None;
    for (a, b) in candidates {
        for tile_a in &rooms[a].edge_tiles {
            for tile_b in &rooms[b].edge_tiles {
                let distance = tile_a.distance_squared(tile_b);
                if best.map_or(true, |link| distance < link.distance) {
                    best = Some(Link {
                        room_a: a,
                        room_b: b,
                        tile_a: *tile_a,
                        tile_b: *tile_b,
                        distance,
                    });
                }
            }
        }
    }
    best
}

/// Adds the symmetric edge and spreads main-room accessibility across it.
pub fn connect_rooms(rooms: &mut [Room], a: usize, b: usize) {
    if rooms[a].is_accessible_from_main_room {
        mark_accessible(rooms, b);
    } else if rooms[b].is_accessible_from_main_room {
        mark_accessible(rooms, a);
    }
    rooms[a].connected.push(b);
    rooms[b].connected.push(a);
}

/// Flags `start` and everything connected to it as accessible.
pub fn mark_accessible(rooms: &mut [Room], start: usize) {
    let mut pending = vec![start];
    while let Some(index) = pending.pop() {
        let room = &mut rooms[index];
        if room.is_accessible_from_main_room {
            continue;
        }
        room.is_accessible_from_main_room = true;
        pending.extend(room.connected.iter().copied());
    }
}

/// Grid points stepped from `from` toward `to`. The destination itself is not
/// included.
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        step = dy.signum();
        gradient_step = dx.signum();
    }

    let mut points = Vec::with_capacity(longest as usize);
    let (mut x, mut y) = (from.x, from.y);
    let mut gradient_accumulation = longest / 2;
    for _ in 0..longest {
        points.push(Coord::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        gradient_accumulation += shortest;
        if gradient_accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            gradient_accumulation -= longest;
        }
    }
    points
}

/// Clears every cell within `radius` of `center`, clipped to the grid.
pub fn carve_disk(grid: &mut Grid, center: Coord, radius: i32) {
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let x_range = (cx - r).max(0)..=(cx + r).min(grid.width() as i64 - 1);
    let y_range = (cy - r).max(0)..=(cy + r).min(grid.height() as i64 - 1);

    for x in x_range {
        for y in y_range.clone() {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                grid.set(x as usize, y as usize, Cell::Empty);
            }
        }
    }
}
