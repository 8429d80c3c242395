// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod map;
pub mod mesh;
pub mod utils;

pub use config::GeneratorConfig;
pub use error::{CaveError, Result};
pub use generator::{CaveGenerator, GeneratedLevel, GenerationStats, LevelSink};
