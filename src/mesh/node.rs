// src/mesh/node.rs
// Node arena and square grid used by the marching-squares pass.

use crate::map::Grid;
use crate::utils::Vector3;

/// Index of a node in `SquareGrid::nodes`.
pub type NodeId = usize;

/// Extra data carried by a node that sits on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPayload {
    /// The cell is a wall.
    pub active: bool,
    /// Midpoint node half a square toward +z.
    pub above: NodeId,
    /// Midpoint node half a square toward +x.
    pub right: NodeId,
}

/// A candidate mesh vertex. Grid-aligned nodes carry a control payload,
/// midpoint nodes do not.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Vector3,
    /// Set the first time a square emits this node, never changed afterwards.
    pub vertex_index: Option<usize>,
    pub control: Option<ControlPayload>,
}

impl Node {
    fn midpoint(position: Vector3) -> Self {
        Node {
            position,
            vertex_index: None,
            control: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.control.map_or(false, |c| c.active)
    }
}

/// Named point of a square, used by the configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquarePoint {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    TopMid,
    RightMid,
    BottomMid,
    LeftMid,
}

/// One cell of the marching-squares grid. Holds node ids only; the nodes
/// belong to the `SquareGrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub top_left: NodeId,
    pub top_right: NodeId,
    pub bottom_right: NodeId,
    pub bottom_left: NodeId,
    pub top_mid: NodeId,
    pub right_mid: NodeId,
    pub bottom_mid: NodeId,
    pub left_mid: NodeId,
    /// 8·topLeft + 4·topRight + 2·bottomRight + 1·bottomLeft.
    pub configuration: u8,
}

impl Square {
    pub fn node(&self, point: SquarePoint) -> NodeId {
        match point {
            SquarePoint::TopLeft => self.top_left,
            SquarePoint::TopRight => self.top_right,
            SquarePoint::BottomRight => self.bottom_right,
            SquarePoint::BottomLeft => self.bottom_left,
            SquarePoint::TopMid => self.top_mid,
            SquarePoint::RightMid => self.right_mid,
            SquarePoint::BottomMid => self.bottom_mid,
            SquarePoint::LeftMid => self.left_mid,
        }
    }

    pub fn corners(&self) -> [NodeId; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

/// Owns every node built from a grid plus the squares that reference them.
#[derive(Debug, Clone)]
pub struct SquareGrid {
    pub nodes: Vec<Node>,
    /// Squares in scan order (x outer, y inner).
    pub squares: Vec<Square>,
}

impl SquareGrid {
    pub fn new(map: &Grid, square_size: f32) -> Self {
        let count_x = map.width();
        let count_y = map.height();
        let map_width = count_x as f32 * square_size;
        let map_height = count_y as f32 * square_size;
        let half = square_size / 2.0;

        let mut nodes = Vec::with_capacity(count_x * count_y * 3);
        let mut controls: Vec<(NodeId, ControlPayload)> = Vec::with_capacity(count_x * count_y);

        for x in 0..count_x {
            for y in 0..count_y {
                let position = Vector3::new(
                    -map_width / 2.0 + x as f32 * square_size + half,
                    0.0,
                    -map_height / 2.0 + y as f32 * square_size + half,
                );
                let id = nodes.len();
                let payload = ControlPayload {
                    active: map.get(x, y).is_wall(),
                    above: id + 1,
                    right: id + 2,
                };
                nodes.push(Node {
                    position,
                    vertex_index: None,
                    control: Some(payload),
                });
                nodes.push(Node::midpoint(position + Vector3::FORWARD * half));
                nodes.push(Node::midpoint(position + Vector3::RIGHT * half));
                controls.push((id, payload));
            }
        }

        let control_at = |x: usize, y: usize| controls[x * count_y + y];
        let mut squares = Vec::with_capacity(count_x.saturating_sub(1) * count_y.saturating_sub(1));
        for x in 0..count_x.saturating_sub(1) {
            for y in 0..count_y.saturating_sub(1) {
                let top_left = control_at(x, y + 1);
                let top_right = control_at(x + 1, y + 1);
                let bottom_right = control_at(x + 1, y);
                let bottom_left = control_at(x, y);

                let configuration = (top_left.1.active as u8) * 8
                    + (top_right.1.active as u8) * 4
                    + (bottom_right.1.active as u8) * 2
                    + bottom_left.1.active as u8;

                squares.push(Square {
                    top_left: top_left.0,
                    top_right: top_right.0,
                    bottom_right: bottom_right.0,
                    bottom_left: bottom_left.0,
                    top_mid: top_left.1.right,
                    right_mid: bottom_right.1.above,
                    bottom_mid: bottom_left.1.right,
                    left_mid: bottom_left.1.above,
                    configuration,
                });
            }
        }

        SquareGrid { nodes, squares }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_node_layout_is_centred() {
        let map = Grid::new(4, 2, Cell::Empty);
        let grid = SquareGrid::new(&map, 1.0);
        assert_eq!(grid.nodes.len(), 4 * 2 * 3);
        assert_eq!(grid.squares.len(), 3);

        let first = &grid.nodes[0];
        assert_approx_eq!(first.position.x, -1.5);
        assert_approx_eq!(first.position.z, -0.5);
        let payload = first.control.unwrap();
        assert_approx_eq!(grid.nodes[payload.above].position.z, 0.0);
        assert_approx_eq!(grid.nodes[payload.right].position.x, -1.0);
        assert!(grid.nodes[payload.above].control.is_none());
    }

    #[test]
    fn test_configuration_bits() {
        let mut map = Grid::new(2, 2, Cell::Empty);
        map.set(0, 1, Cell::Wall); // top left
        map.set(1, 0, Cell::Wall); // bottom right
        let grid = SquareGrid::new(&map, 1.0);
        assert_eq!(grid.squares[0].configuration, 8 + 2);
        assert!(grid.nodes[grid.squares[0].top_left].is_active());
        assert!(!grid.nodes[grid.squares[0].bottom_left].is_active());
    }

    #[test]
    fn test_neighbouring_squares_share_midpoints() {
        let map = Grid::new(3, 3, Cell::Wall);
        let grid = SquareGrid::new(&map, 1.0);
        // Squares (0, 0) and (0, 1): the first's top edge is the second's bottom edge.
        let lower = grid.squares[0];
        let upper = grid.squares[1];
        assert_eq!(lower.top_mid, upper.bottom_mid);
        assert_eq!(lower.top_left, upper.bottom_left);
        // Squares (0, 0) and (1, 0) share a vertical edge.
        let right = grid.squares[2];
        assert_eq!(lower.right_mid, right.left_mid);
    }

    #[test]
    fn test_degenerate_map_has_no_squares() {
        let map = Grid::new(1, 5, Cell::Wall);
        assert!(SquareGrid::new(&map, 1.0).squares.is_empty());
    }
}
