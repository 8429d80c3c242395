#![warn(non_snake_case)]
//! # Cavern
//!
//! Command-line front end for the cave generator. Builds a configuration from
//! an optional JSON file plus flag overrides, generates one or more levels in
//! parallel and writes the requested previews, summaries and mesh dumps.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use cavern::export::{write_mesh_binary, write_preview_png, write_summary_json};
use cavern::mesh::{ColliderMode, Colliders, Mesh};
use cavern::{CaveGenerator, GeneratedLevel, GeneratorConfig, LevelSink, Result};

#[derive(Parser, Debug)]
#[command(name = "cavern")]
#[command(about = "Generate cellular-automaton caves and their meshes")]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interior width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Interior height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Wall rings added around the finished map
    #[arg(short, long)]
    border: Option<usize>,

    /// Seed text (numbers are used as-is, anything else is hashed)
    #[arg(short, long)]
    seed: Option<String>,

    /// Ignore any fixed seed and draw a fresh one
    #[arg(long)]
    random_seed: bool,

    /// Percentage of cells initially filled with wall (0-100)
    #[arg(short, long)]
    fill: Option<u32>,

    /// Smoothing iterations
    #[arg(long)]
    smoothing: Option<usize>,

    /// Radius of the disk carved along each passage
    #[arg(long)]
    radius: Option<i32>,

    /// World size of one cell
    #[arg(long)]
    square_size: Option<f32>,

    /// Height of the extruded collider walls
    #[arg(long)]
    wall_height: Option<f32>,

    /// Collider geometry to build
    #[arg(long, value_enum)]
    colliders: Option<ColliderMode>,

    /// Number of levels to generate from consecutive seeds
    #[arg(short = 'n', long, default_value = "1")]
    count: u64,

    /// Write a PNG preview of the grid
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Write a JSON summary of rooms, passages and stats
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write the render mesh in binary form
    #[arg(long)]
    mesh: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(GeneratorConfig, Outputs)> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(border) = self.border {
            config.border_size = border;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
            config.use_random_seed = false;
        }
        if self.random_seed {
            config.use_random_seed = true;
        }
        if let Some(fill) = self.fill {
            config.random_fill_percent = fill;
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing_iterations = smoothing;
        }
        if let Some(radius) = self.radius {
            config.connection_radius = radius;
        }
        if let Some(size) = self.square_size {
            config.square_size = size;
        }
        if let Some(height) = self.wall_height {
            config.wall_height = height;
        }
        if let Some(mode) = self.colliders {
            config.collider_mode = mode;
        }

        let outputs = Outputs {
            count: self.count.max(1),
            preview: self.preview,
            summary: self.summary,
            mesh: self.mesh,
        };
        Ok((config, outputs))
    }
}

struct Outputs {
    count: u64,
    preview: Option<PathBuf>,
    summary: Option<PathBuf>,
    mesh: Option<PathBuf>,
}

/// Logs what a level hands over to its consumers.
struct ReportSink {
    index: u64,
}

impl LevelSink for ReportSink {
    fn submit_mesh(&mut self, mesh: &Mesh) {
        info!(
            "Level {}: render mesh with {} vertices, {} triangles",
            self.index,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
    }

    fn submit_colliders(&mut self, colliders: &Colliders) {
        let kind = match colliders {
            Colliders::WallMesh(_) => "wall triangles",
            Colliders::Edges(_) => "edge chains",
        };
        info!("Level {}: {} {}", self.index, colliders.shape_count(), kind);
    }
}

/// `cave.png` stays as-is for a single level and becomes `cave_3.png` in a batch.
fn indexed_path(path: &Path, index: u64, count: u64) -> PathBuf {
    if count == 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("level");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index, ext),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}

fn write_outputs(level: &GeneratedLevel, outputs: &Outputs, index: u64) -> Result<()> {
    if let Some(path) = &outputs.preview {
        let path = indexed_path(path, index, outputs.count);
        write_preview_png(&level.grid, &path)?;
        info!("Wrote preview to {}", path.display());
    }
    if let Some(path) = &outputs.summary {
        let path = indexed_path(path, index, outputs.count);
        write_summary_json(level, &path)?;
        info!("Wrote summary to {}", path.display());
    }
    if let Some(path) = &outputs.mesh {
        let path = indexed_path(path, index, outputs.count);
        write_mesh_binary(&level.mesh, &path)?;
        info!("Wrote mesh to {}", path.display());
    }
    Ok(())
}

fn run(args: Args) -> Result<bool> {
    let (config, outputs) = args.into_config()?;
    let generator = CaveGenerator::new(config)?;
    let base = generator.config().resolve_seed()?;
    let seeds: Vec<_> = (0..outputs.count).map(|i| base.offset(i)).collect();

    info!("Generating {} level(s) from seed {}", seeds.len(), base);
    let mut all_ok = true;
    for (index, result) in (0u64..).zip(generator.generate_batch(&seeds)) {
        match result {
            Ok(level) => {
                level.emit(&mut ReportSink { index });
                write_outputs(&level, &outputs, index)?;
            }
            Err(e) => {
                error!("Level {} (seed {}) failed: {}", index, seeds[index as usize], e);
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    env_logger::init();
    info!("Cavern starting...");

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_path() {
        let path = Path::new("out/cave.png");
        assert_eq!(indexed_path(path, 0, 1), PathBuf::from("out/cave.png"));
        assert_eq!(indexed_path(path, 3, 5), PathBuf::from("out/cave_3.png"));
        assert_eq!(indexed_path(Path::new("mesh"), 1, 2), PathBuf::from("mesh_1"));
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["cavern", "-W", "30", "--seed", "cave", "--fill", "40", "-n", "0"]);
        let (config, outputs) = args.into_config().unwrap();
        assert_eq!(config.width, 30);
        assert_eq!(config.seed.as_deref(), Some("cave"));
        assert!(!config.use_random_seed);
        assert_eq!(config.random_fill_percent, 40);
        assert_eq!(outputs.count, 1);
    }
}
