//! # Tilecraft - 2D Side-Scrolling Tile Sandbox
//!
//! Procedurally generated tile terrain streamed in chunks, with a player
//! that walks, jumps and edits the world one tile at a time.

pub mod config;
pub mod headless;

// Re-export core modules for convenience
pub use tilecraft_core::entity;
pub use tilecraft_core::simulation;
pub use tilecraft_core::world;

pub use config::GameConfig;

/// Common imports for internal use
pub mod prelude {
    pub use glam::Vec2;
    pub use tilecraft_core::simulation::{CHUNK_SIZE, TILE_SIZE, TileKind};
    pub use tilecraft_core::world::{FrameSnapshot, TilePos, WorldController, WorldStore};
}
