// src/generator.rs
// Runs the full pipeline: sample, smooth, clean up, connect, pad, triangulate, trace.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::map::{
    AberrationRemover, CellularAutomatonSmoother, Grid, Passage, RandomMapSampler, Room,
    RoomConnector, Seed,
};
use crate::mesh::{
    Colliders, MarchingSquaresTriangulator, Mesh, Outline, OutlineTracer, WallBuilder,
};

/// Receives the finished geometry, e.g. a renderer and a physics world.
pub trait LevelSink {
    fn submit_mesh(&mut self, mesh: &Mesh);
    fn submit_colliders(&mut self, colliders: &Colliders);
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct GenerationStats {
    /// Wall-clock time of the pass in milliseconds.
    pub generation_time: f64,
    pub room_count: usize,
    pub passage_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub outline_count: usize,
}

/// Everything produced by one generation pass. Owned outright by the caller.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub seed: Seed,
    /// Final grid, border included.
    pub grid: Grid,
    /// Rooms in size order, main room first. Tile coordinates are interior
    /// (unbordered) grid coordinates.
    pub rooms: Vec<Room>,
    pub passages: Vec<Passage>,
    pub mesh: Mesh,
    pub outlines: Vec<Outline>,
    pub colliders: Colliders,
    pub stats: GenerationStats,
}

impl GeneratedLevel {
    /// Hands the render mesh and the colliders to `sink`.
    pub fn emit(&self, sink: &mut dyn LevelSink) {
        sink.submit_mesh(&self.mesh);
        sink.submit_colliders(&self.colliders);
    }
}

pub struct CaveGenerator {
    config: GeneratorConfig,
}

impl CaveGenerator {
    /// Validates `config` up front; a generator that exists can always run.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(CaveGenerator { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GeneratedLevel> {
        let seed = self.config.resolve_seed()?;
        self.generate_with_seed(seed)
    }

    pub fn generate_with_seed(&self, seed: Seed) -> Result<GeneratedLevel> {
        let start = Instant::now();
        let config = &self.config;

        let grid = RandomMapSampler::new(config.width, config.height, config.random_fill_percent)
            .sample(seed);
        let mut grid = CellularAutomatonSmoother::new(config.smoothing_iterations).smooth(grid);
        debug!(
            "Seed {}: sampled and smoothed {}x{} grid ({} iterations)",
            seed, config.width, config.height, config.smoothing_iterations
        );

        let mut rooms = AberrationRemover::new(config.wall_threshold, config.room_threshold)
            .apply(&mut grid)?;
        let passages = RoomConnector::new(config.connection_radius).connect(&mut grid, &mut rooms);
        let grid = grid.with_border(config.border_size);

        let triangulation = MarchingSquaresTriangulator::new(&grid, config.square_size).triangulate();
        let outlines = OutlineTracer::new(&triangulation).trace();
        let mesh = Mesh::from_triangulation(
            &triangulation,
            grid.width() as f32 * config.square_size,
            grid.height() as f32 * config.square_size,
            config.tile_amount,
        );
        let colliders = WallBuilder::new(config.wall_height).build(
            config.collider_mode,
            &mesh.vertices,
            &outlines,
        );

        let stats = GenerationStats {
            generation_time: start.elapsed().as_secs_f64() * 1000.0,
            room_count: rooms.len(),
            passage_count: passages.len(),
            vertex_count: mesh.vertices.len(),
            triangle_count: mesh.triangle_count(),
            outline_count: outlines.len(),
        };
        info!(
            "Generated level (seed {}): {} rooms, {} passages, {} vertices, {} triangles, {} outlines in {:.2}ms",
            seed,
            stats.room_count,
            stats.passage_count,
            stats.vertex_count,
            stats.triangle_count,
            stats.outline_count,
            stats.generation_time
        );

        Ok(GeneratedLevel {
            seed,
            grid,
            rooms,
            passages,
            mesh,
            outlines,
            colliders,
            stats,
        })
    }

    /// Independent passes for each seed, run in parallel. Each pass owns its
    /// own grid and mesh; nothing is shared between them.
    pub fn generate_batch(&self, seeds: &[Seed]) -> Vec<Result<GeneratedLevel>> {
        seeds
            .par_iter()
            .map(|&seed| self.generate_with_seed(seed))
            .collect()
    }
}
