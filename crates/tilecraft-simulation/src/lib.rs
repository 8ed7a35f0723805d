//! Tile vocabulary for Tilecraft
//!
//! This crate provides the foundational data types shared by the world
//! simulation and any presentation layer:
//! - Tile kinds (TileKind) with display names and glyphs
//! - Grid constants and coordinate helpers (TILE_SIZE, CHUNK_SIZE)

mod grid;
mod tiles;

pub use grid::{
    CHUNK_SIZE, CHUNK_WIDTH, TILE_SIZE, chunk_index_for_column, chunk_index_for_x,
    chunk_column_span, grid_coord,
};
pub use tiles::TileKind;
