//! World management - generation, tile storage, collision, tick orchestration

mod collision;
mod controller;
pub mod generation;
mod noise_source;
pub mod rng_trait;
mod snapshot;
pub mod structure_placement;
mod tile;
mod world_store;
pub mod worldgen_config;

pub use collision::{Aabb, Axis, Sweep, sweep_axis};
pub use controller::{ControllerConfig, TickReport, WorldController};
pub use generation::{ChunkTiles, TerrainGenerator};
pub use noise_source::NoiseSource;
pub use rng_trait::WorldRng;
pub use snapshot::FrameSnapshot;
pub use structure_placement::{StructureKind, StructurePlacement};
pub use tile::{PlacedTile, TilePos};
pub use world_store::{LoadReport, WorldStore};
pub use worldgen_config::{
    ConfigError, NoiseParams, StructureParams, TreeConfig, WorldGenConfig, WorldParams,
};
