//! Grid constants and coordinate conversions
//!
//! World space is measured in units (one unit = one screen pixel at 1:1),
//! with x growing to the right and y growing downward. Tiles sit on a
//! `TILE_SIZE` grid; chunks are `CHUNK_SIZE` tile columns wide and unbounded
//! vertically.

use std::ops::RangeInclusive;

/// Edge length of a tile in world units
pub const TILE_SIZE: i32 = 32;

/// Number of tile columns in a chunk
pub const CHUNK_SIZE: i32 = 16;

/// Width of a chunk in world units (16 * 32 = 512)
pub const CHUNK_WIDTH: i32 = CHUNK_SIZE * TILE_SIZE;

/// Convert a world coordinate to the grid coordinate of the tile containing it
pub fn grid_coord(world: f32) -> i32 {
    (world / TILE_SIZE as f32).floor() as i32
}

/// Chunk index containing world x position
pub fn chunk_index_for_x(world_x: f32) -> i32 {
    (world_x / CHUNK_WIDTH as f32).floor() as i32
}

/// Chunk index containing tile column `gx`
pub fn chunk_index_for_column(gx: i32) -> i32 {
    gx.div_euclid(CHUNK_SIZE)
}

/// Tile columns covered by a chunk
pub fn chunk_column_span(chunk_index: i32) -> RangeInclusive<i32> {
    let first = chunk_index * CHUNK_SIZE;
    first..=first + CHUNK_SIZE - 1
}
