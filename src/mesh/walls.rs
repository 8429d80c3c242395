// src/mesh/walls.rs
// Collider geometry built from traced outlines.

use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, Outline};
use crate::utils::{Point2D, Vector3};

pub const DEFAULT_WALL_HEIGHT: f32 = 5.0;

/// Which kind of collider geometry a level is emitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColliderMode {
    /// Vertical wall strips hanging below every outline.
    #[default]
    Walls3d,
    /// Outline points projected onto the ground plane.
    Edges2d,
}

/// Geometry handed to the physics side.
#[derive(Debug, Clone, PartialEq)]
pub enum Colliders {
    WallMesh(Mesh),
    Edges(Vec<Vec<Point2D>>),
}

impl Colliders {
    pub fn shape_count(&self) -> usize {
        match self {
            Colliders::WallMesh(mesh) => mesh.triangle_count(),
            Colliders::Edges(chains) => chains.len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WallBuilder {
    pub wall_height: f32,
}

impl Default for WallBuilder {
    fn default() -> Self {
        WallBuilder { wall_height: DEFAULT_WALL_HEIGHT }
    }
}

impl WallBuilder {
    pub fn new(wall_height: f32) -> Self {
        WallBuilder { wall_height }
    }

    pub fn build(&self, mode: ColliderMode, vertices: &[Vector3], outlines: &[Outline]) -> Colliders {
        match mode {
            ColliderMode::Walls3d => Colliders::WallMesh(self.wall_mesh(vertices, outlines)),
            ColliderMode::Edges2d => Colliders::Edges(edge_chains(vertices, outlines)),
        }
    }

    /// One quad per outline segment, extruded straight down.
    pub fn wall_mesh(&self, vertices: &[Vector3], outlines: &[Outline]) -> Mesh {
        let drop = Vector3::UP * self.wall_height;
        let mut mesh = Mesh::default();

        for outline in outlines {
            for segment in outline.windows(2) {
                let left = vertices[segment[0]];
                let right = vertices[segment[1]];
                let start = mesh.vertices.len();

                mesh.vertices.extend([left, right, left - drop, right - drop]);
                mesh.triangles.extend([start, start + 2, start + 3]);
                mesh.triangles.extend([start + 3, start + 1, start]);
            }
        }
        mesh
    }
}

/// Each outline as a chain of ground-plane points.
pub fn edge_chains(vertices: &[Vector3], outlines: &[Outline]) -> Vec<Vec<Point2D>> {
    outlines
        .iter()
        .map(|outline| outline.iter().map(|&v| vertices[v].ground()).collect())
        .collect()
}

/// Perimeter of an outline on the ground plane.
pub fn outline_length(vertices: &[Vector3], outline: &Outline) -> f32 {
    outline
        .windows(2)
        .map(|pair| vertices[pair[0]].ground().distance_to(&vertices[pair[1]].ground()))
        .sum()
}
