// src/mesh/triangulator.rs
// Marching squares over the bordered grid.

use crate::map::Grid;
use crate::mesh::node::{NodeId, SquareGrid, SquarePoint};
use crate::utils::Vector3;

use crate::mesh::node::SquarePoint::{
    BottomLeft as BL, BottomMid as BM, BottomRight as BR, LeftMid as LM, RightMid as RM,
    TopLeft as TL, TopMid as TM, TopRight as TR,
};

/// Points emitted for each configuration, in fan order.
const CONFIGURATIONS: [&[SquarePoint]; 16] = [
    &[],
    &[LM, BM, BL],
    &[BR, BM, RM],
    &[RM, BR, BL, LM],
    &[TR, RM, TM],
    &[TM, TR, RM, BM, BL, LM],
    &[TM, TR, BR, BM],
    &[TM, TR, BR, BL, LM],
    &[TL, TM, LM],
    &[TL, TM, BM, BL],
    &[TL, TM, RM, BR, BM, LM],
    &[TL, TM, RM, BR, BL],
    &[TL, TR, RM, LM],
    &[TL, TR, RM, BM, BL],
    &[TL, TR, BR, BM, LM],
    &[TL, TR, BR, BL],
];

const SOLID: u8 = 15;

/// Raw output of marching squares: deduplicated vertices, triangles and the
/// vertices already known to be interior.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    pub vertices: Vec<Vector3>,
    pub triangles: Vec<[usize; 3]>,
    /// Indexed by vertex. Corners of fully solid squares start out checked.
    pub checked: Vec<bool>,
}

pub struct MarchingSquaresTriangulator {
    grid: SquareGrid,
    output: Triangulation,
}

impl MarchingSquaresTriangulator {
    pub fn new(map: &Grid, square_size: f32) -> Self {
        MarchingSquaresTriangulator {
            grid: SquareGrid::new(map, square_size),
            output: Triangulation::default(),
        }
    }

    pub fn triangulate(mut self) -> Triangulation {
        for index in 0..self.grid.squares.len() {
            let square = self.grid.squares[index];
            let points: Vec<NodeId> = CONFIGURATIONS[square.configuration as usize]
                .iter()
                .map(|&point| square.node(point))
                .collect();
            self.mesh_from_points(&points);

            if square.configuration == SOLID {
                for corner in square.corners() {
                    if let Some(vertex) = self.grid.nodes[corner].vertex_index {
                        self.output.checked[vertex] = true;
                    }
                }
            }
        }
        self.output
    }

    fn mesh_from_points(&mut self, points: &[NodeId]) {
        let vertices: Vec<usize> = points.iter().map(|&id| self.assign_vertex(id)).collect();
        // Fan around the first point: (0,1,2), (0,2,3), (0,3,4), (0,4,5).
        for i in 1..vertices.len().saturating_sub(1) {
            self.output
                .triangles
                .push([vertices[0], vertices[i], vertices[i + 1]]);
        }
    }

    /// Vertex index of a node, allocating one the first time it is seen.
    fn assign_vertex(&mut self, id: NodeId) -> usize {
        let node = &mut self.grid.nodes[id];
        if let Some(index) = node.vertex_index {
            return index;
        }
        let index = self.output.vertices.len();
        node.vertex_index = Some(index);
        self.output.vertices.push(node.position);
        self.output.checked.push(false);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use std::collections::HashMap;

    fn square_map(bits: u8) -> Grid {
        let mut map = Grid::new(2, 2, Cell::Empty);
        let corners = [(0, 1, 8), (1, 1, 4), (1, 0, 2), (0, 0, 1)];
        for (x, y, bit) in corners {
            if bits & bit != 0 {
                map.set(x, y, Cell::Wall);
            }
        }
        map
    }

    #[test]
    fn test_solid_square_two_triangles_all_checked() {
        let out = MarchingSquaresTriangulator::new(&square_map(15), 1.0).triangulate();
        assert_eq!(out.vertices.len(), 4);
        assert_eq!(out.triangles.len(), 2);
        assert!(out.checked.iter().all(|&c| c));
    }

    #[test]
    fn test_empty_square_emits_nothing() {
        let out = MarchingSquaresTriangulator::new(&square_map(0), 1.0).triangulate();
        assert!(out.vertices.is_empty());
        assert!(out.triangles.is_empty());
    }

    #[test]
    fn test_triangle_counts_per_configuration() {
        for configuration in 0..16u8 {
            let points = CONFIGURATIONS[configuration as usize].len();
            let out = MarchingSquaresTriangulator::new(&square_map(configuration), 1.0).triangulate();
            assert_eq!(out.vertices.len(), points, "configuration {}", configuration);
            assert_eq!(out.triangles.len(), points.saturating_sub(2));
            let checked = out.checked.iter().filter(|&&c| c).count();
            assert_eq!(checked, if configuration == SOLID { 4 } else { 0 });
        }
    }

    #[test]
    fn test_every_point_list_covers_its_active_corners() {
        for (configuration, points) in CONFIGURATIONS.iter().enumerate() {
            let corners = [(TL, 8), (TR, 4), (BR, 2), (BL, 1)];
            for (corner, bit) in corners {
                let active = configuration & bit != 0;
                assert_eq!(points.contains(&corner), active, "configuration {}", configuration);
            }
        }
    }

    #[test]
    fn test_shared_nodes_reuse_vertices() {
        let map = Grid::new(3, 3, Cell::Wall);
        let out = MarchingSquaresTriangulator::new(&map, 1.0).triangulate();
        // 9 corner nodes, no midpoints used.
        assert_eq!(out.vertices.len(), 9);
        assert_eq!(out.triangles.len(), 8);
    }

    #[test]
    fn test_no_edge_shared_by_more_than_two_triangles() {
        let mut map = Grid::new(6, 6, Cell::Wall);
        for (x, y) in [(1, 1), (2, 1), (2, 2), (3, 3), (4, 2), (1, 4)] {
            map.set(x, y, Cell::Empty);
        }
        let out = MarchingSquaresTriangulator::new(&map, 1.0).triangulate();
        let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
        for tri in &out.triangles {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *edges.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }
        assert!(edges.values().all(|&n| n <= 2));
    }
}
