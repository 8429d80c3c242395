// src/export.rs
//! Writers for generated levels: a grayscale PNG of the grid, a JSON summary
//! and a little-endian binary dump of the render mesh.
//!
//! Mesh layout: `CAVM` magic, u32 version, u32 vertex count, u32 index count,
//! then `xyz` f32 triples, u32 indices and `uv` f32 pairs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{WriteBytesExt, LE};
use image::{GrayImage, Luma};
use serde::Serialize;

use crate::error::Result;
use crate::generator::{GeneratedLevel, GenerationStats};
use crate::map::{Grid, Passage, Seed};
use crate::mesh::walls::outline_length;
use crate::mesh::Mesh;

pub const MESH_MAGIC: &[u8; 4] = b"CAVM";
pub const MESH_VERSION: u32 = 1;

const WALL_SHADE: u8 = 0;
const FLOOR_SHADE: u8 = 255;

/// One pixel per cell, walls black. Row 0 of the image is the top of the map.
pub fn preview_image(grid: &Grid) -> GrayImage {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    let mut image = GrayImage::new(width, height);
    for (x, y, cell) in grid.scan() {
        let shade = if cell.is_wall() { WALL_SHADE } else { FLOOR_SHADE };
        image.put_pixel(x as u32, height - 1 - y as u32, Luma([shade]));
    }
    image
}

pub fn write_preview_png<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    preview_image(grid).save(path)?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub size: usize,
    pub edge_tiles: usize,
    pub connected: Vec<usize>,
    pub is_main_room: bool,
    pub is_accessible_from_main_room: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary {
    pub seed: Seed,
    pub width: usize,
    pub height: usize,
    pub stats: GenerationStats,
    pub rooms: Vec<RoomSummary>,
    pub passages: Vec<Passage>,
    pub outline_lengths: Vec<f32>,
}

impl LevelSummary {
    pub fn new(level: &GeneratedLevel) -> Self {
        LevelSummary {
            seed: level.seed,
            width: level.grid.width(),
            height: level.grid.height(),
            stats: level.stats.clone(),
            rooms: level
                .rooms
                .iter()
                .map(|room| RoomSummary {
                    size: room.size(),
                    edge_tiles: room.edge_tiles.len(),
                    connected: room.connected.clone(),
                    is_main_room: room.is_main_room,
                    is_accessible_from_main_room: room.is_accessible_from_main_room,
                })
                .collect(),
            passages: level.passages.clone(),
            outline_lengths: level
                .outlines
                .iter()
                .map(|outline| outline_length(&level.mesh.vertices, outline))
                .collect(),
        }
    }
}

pub fn write_summary_json<P: AsRef<Path>>(level: &GeneratedLevel, path: P) -> Result<()> {
    let text = serde_json::to_string_pretty(&LevelSummary::new(level))?;
    fs::write(path, text)?;
    Ok(())
}

pub fn write_mesh<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writer.write_all(MESH_MAGIC)?;
    writer.write_u32::<LE>(MESH_VERSION)?;
    writer.write_u32::<LE>(mesh.vertices.len() as u32)?;
    writer.write_u32::<LE>(mesh.triangles.len() as u32)?;

    for v in &mesh.vertices {
        writer.write_f32::<LE>(v.x)?;
        writer.write_f32::<LE>(v.y)?;
        writer.write_f32::<LE>(v.z)?;
    }
    for &index in &mesh.triangles {
        writer.write_u32::<LE>(index as u32)?;
    }
    for uv in &mesh.uvs {
        writer.write_f32::<LE>(uv[0])?;
        writer.write_f32::<LE>(uv[1])?;
    }
    Ok(())
}

pub fn write_mesh_binary<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_mesh(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}
