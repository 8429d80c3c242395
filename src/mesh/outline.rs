// src/mesh/outline.rs
// Boundary tracing over a marching-squares triangulation.

use crate::mesh::Triangulation;

/// Closed loop of vertex indices; the first index is repeated at the end.
pub type Outline = Vec<usize>;

pub struct OutlineTracer<'a> {
    triangles: &'a [[usize; 3]],
    /// Triangle ids containing each vertex, in creation order.
    triangles_by_vertex: Vec<Vec<usize>>,
    checked: Vec<bool>,
}

impl<'a> OutlineTracer<'a> {
    pub fn new(triangulation: &'a Triangulation) -> Self {
        let mut triangles_by_vertex = vec![Vec::new(); triangulation.vertices.len()];
        for (id, triangle) in triangulation.triangles.iter().enumerate() {
            for &vertex in triangle {
                triangles_by_vertex[vertex].push(id);
            }
        }
        OutlineTracer {
            triangles: &triangulation.triangles,
            triangles_by_vertex,
            checked: triangulation.checked.clone(),
        }
    }

    pub fn trace(mut self) -> Vec<Outline> {
        let mut outlines = Vec::new();
        for start in 0..self.triangles_by_vertex.len() {
            if self.checked[start] {
                continue;
            }
            let Some(mut current) = self.connected_outline_vertex(start) else {
                continue;
            };
            self.checked[start] = true;
            let mut outline = vec![start];

            loop {
                outline.push(current);
                self.checked[current] = true;
                match self.connected_outline_vertex(current) {
                    Some(next) => current = next,
                    None => break,
                }
            }

            outline.push(start);
            outlines.push(outline);
        }
        outlines
    }

    /// First unchecked vertex joined to `vertex` by a boundary edge.
    fn connected_outline_vertex(&self, vertex: usize) -> Option<usize> {
        self.triangles_by_vertex[vertex]
            .iter()
            .flat_map(|&id| self.triangles[id])
            .find(|&other| other != vertex && !self.checked[other] && self.is_outline_edge(vertex, other))
    }

    /// An edge belongs to the outline iff exactly one triangle contains it.
    pub fn is_outline_edge(&self, a: usize, b: usize) -> bool {
        self.triangles_by_vertex[a]
            .iter()
            .filter(|&&id| self.triangles[id].contains(&b))
            .take(2)
            .count()
            == 1
    }
}
