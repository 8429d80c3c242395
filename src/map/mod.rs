// src/map/mod.rs
//! Map generation: seeded sampling, smoothing, region clean-up and room connection.

pub mod connector;
pub mod grid;
pub mod region;
pub mod room;
pub mod sampler;
pub mod smoothing;

pub use connector::{Passage, RoomConnector};
pub use grid::{Cell, Coord, Grid};
pub use region::{Region, RegionAnalyzer};
pub use room::{AberrationRemover, Room};
pub use sampler::{RandomMapSampler, Seed};
pub use smoothing::CellularAutomatonSmoother;
