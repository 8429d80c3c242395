// src/error.rs

use thiserror::Error;

/// Everything that can go wrong while configuring, generating or exporting a level.
#[derive(Debug, Error)]
pub enum CaveError {
    #[error("invalid map dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("random fill percent {0} is outside 0..=100")]
    InvalidFillPercent(u32),

    #[error("a fixed seed is required when use_random_seed is false")]
    MissingSeed,

    #[error("connection radius must not be negative, got {0}")]
    InvalidConnectionRadius(i32),

    #[error("square size must be a positive finite number, got {0}")]
    InvalidSquareSize(f32),

    #[error("wall height must be a finite number, got {0}")]
    InvalidWallHeight(f32),

    #[error("tile amount must be a finite number, got {0}")]
    InvalidTileAmount(f32),

    #[error("no room survived aberration removal, cannot designate a main room")]
    NoRooms,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CaveError>;
