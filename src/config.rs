// src/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};
use crate::map::room::{DEFAULT_ROOM_THRESHOLD, DEFAULT_WALL_THRESHOLD};
use crate::map::Seed;
use crate::mesh::walls::DEFAULT_WALL_HEIGHT;
use crate::mesh::{ColliderMode, DEFAULT_TILE_AMOUNT};

/// Everything a generation pass depends on. Loaded from JSON, any missing
/// field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Zero skips padding entirely.
    pub border_size: usize,
    pub seed: Option<String>,
    /// Draw a fresh seed on every call instead of using `seed`.
    pub use_random_seed: bool,
    pub smoothing_iterations: usize,
    pub random_fill_percent: u32,
    pub connection_radius: i32,
    pub wall_threshold: usize,
    pub room_threshold: usize,
    pub square_size: f32,
    pub wall_height: f32,
    pub tile_amount: f32,
    pub collider_mode: ColliderMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            width: 128,
            height: 72,
            border_size: 5,
            seed: None,
            use_random_seed: true,
            smoothing_iterations: 5,
            random_fill_percent: 47,
            connection_radius: 2,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            room_threshold: DEFAULT_ROOM_THRESHOLD,
            square_size: 1.0,
            wall_height: DEFAULT_WALL_HEIGHT,
            tile_amount: DEFAULT_TILE_AMOUNT,
            collider_mode: ColliderMode::Walls3d,
        }
    }
}

impl GeneratorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Rejects configurations that cannot produce a level.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.random_fill_percent > 100 {
            return Err(CaveError::InvalidFillPercent(self.random_fill_percent));
        }
        if !self.use_random_seed && self.seed.is_none() {
            return Err(CaveError::MissingSeed);
        }
        if self.connection_radius < 0 {
            return Err(CaveError::InvalidConnectionRadius(self.connection_radius));
        }
        if !(self.square_size.is_finite() && self.square_size > 0.0) {
            return Err(CaveError::InvalidSquareSize(self.square_size));
        }
        if !self.wall_height.is_finite() {
            return Err(CaveError::InvalidWallHeight(self.wall_height));
        }
        if !self.tile_amount.is_finite() {
            return Err(CaveError::InvalidTileAmount(self.tile_amount));
        }
        Ok(())
    }

    /// The seed for the next pass: fresh when `use_random_seed` is set,
    /// otherwise derived from the configured text.
    pub fn resolve_seed(&self) -> Result<Seed> {
        if self.use_random_seed {
            return Ok(Seed::random());
        }
        self.seed
            .as_deref()
            .map(Seed::from_text)
            .ok_or(CaveError::MissingSeed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(seed: &str) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed.to_string()),
            use_random_seed: false,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = GeneratorConfig { width: 0, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidDimensions { width: 0, .. })));
    }

    #[test]
    fn test_fill_percent_rejected() {
        let config = GeneratorConfig { random_fill_percent: 101, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidFillPercent(101))));
    }

    #[test]
    fn test_missing_seed_rejected() {
        let config = GeneratorConfig { use_random_seed: false, seed: None, ..GeneratorConfig::default() };
        assert!(matches!(config.validate(), Err(CaveError::MissingSeed)));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let config = GeneratorConfig { connection_radius: -1, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidConnectionRadius(-1))));
    }

    #[test]
    fn test_bad_square_size_rejected() {
        let config = GeneratorConfig { square_size: 0.0, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidSquareSize(_))));
    }

    #[test]
    fn test_non_finite_mesh_scales_rejected() {
        let config = GeneratorConfig { wall_height: f32::NAN, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidWallHeight(_))));
        let config = GeneratorConfig { tile_amount: f32::INFINITY, ..fixed("1") };
        assert!(matches!(config.validate(), Err(CaveError::InvalidTileAmount(_))));
    }

    #[test]
    fn test_zero_border_accepted() {
        let config = GeneratorConfig { border_size: 0, ..fixed("1") };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_seed_resolves_the_same() {
        let config = fixed("glowworm");
        assert_eq!(config.resolve_seed().unwrap(), config.resolve_seed().unwrap());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{ "width": 40, "seed": "abc", "use_random_seed": false, "collider_mode": "edges2d" }"#,
        )
        .unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, GeneratorConfig::default().height);
        assert_eq!(config.collider_mode, ColliderMode::Edges2d);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_fill_fails_to_parse() {
        let parsed = serde_json::from_str::<GeneratorConfig>(r#"{ "random_fill_percent": -3 }"#);
        assert!(parsed.is_err());
    }
}
