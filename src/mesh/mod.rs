// src/mesh/mod.rs
//! Mesh extraction: marching-squares triangulation, outline tracing and
//! collider geometry.

pub mod node;
pub mod outline;
pub mod triangulator;
pub mod walls;

pub use node::{Node, Square, SquareGrid};
pub use outline::{Outline, OutlineTracer};
pub use triangulator::{MarchingSquaresTriangulator, Triangulation};
pub use walls::{ColliderMode, Colliders, WallBuilder};

use crate::utils::util::inverse_lerp;
use crate::utils::Vector3;

/// How many times the texture repeats across the whole map by default.
pub const DEFAULT_TILE_AMOUNT: f32 = 10.0;

/// Flat render mesh: positions, triangle index list and texture coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3>,
    /// Three indices per triangle.
    pub triangles: Vec<usize>,
    pub uvs: Vec<[f32; 2]>,
}

impl Mesh {
    /// Render mesh for a triangulation, with UVs spread over a map of
    /// `map_width` x `map_height` world units centred on the origin.
    pub fn from_triangulation(
        triangulation: &Triangulation,
        map_width: f32,
        map_height: f32,
        tile_amount: f32,
    ) -> Self {
        let vertices = triangulation.vertices.clone();
        let uvs = generate_uvs(&vertices, map_width, map_height, tile_amount);
        Mesh {
            vertices,
            triangles: triangulation.triangles.iter().flatten().copied().collect(),
            uvs,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

pub fn generate_uvs(vertices: &[Vector3], map_width: f32, map_height: f32, tile_amount: f32) -> Vec<[f32; 2]> {
    let (half_w, half_h) = (map_width / 2.0, map_height / 2.0);
    vertices
        .iter()
        .map(|v| {
            [
                inverse_lerp(-half_w, half_w, v.x) * tile_amount,
                inverse_lerp(-half_h, half_h, v.z) * tile_amount,
            ]
        })
        .collect()
}
