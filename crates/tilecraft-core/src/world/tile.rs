//! Tile coordinates and placed-tile records

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use tilecraft_simulation::{TILE_SIZE, TileKind, chunk_index_for_column, grid_coord};

/// Integer grid coordinate of a tile
///
/// Ordered column-major (by x, then y) so sorted tile lists read left to
/// right, top to bottom within each column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos(IVec2);

impl Ord for TilePos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.0.x, self.0.y).cmp(&(other.0.x, other.0.y))
    }
}

impl PartialOrd for TilePos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl TilePos {
    pub fn new(gx: i32, gy: i32) -> Self {
        Self(IVec2::new(gx, gy))
    }

    /// Tile containing the world-space point
    pub fn from_world(point: Vec2) -> Self {
        Self::new(grid_coord(point.x), grid_coord(point.y))
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    /// World-space top-left corner
    pub fn world_origin(self) -> Vec2 {
        (self.0 * TILE_SIZE).as_vec2()
    }

    pub fn chunk_index(self) -> i32 {
        chunk_index_for_column(self.0.x)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self(self.0 + IVec2::new(dx, dy))
    }
}

impl rstar::Point for TilePos {
    type Scalar = i32;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        TilePos(IVec2::new(generator(0), generator(1)))
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.0.x,
            1 => self.0.y,
            _ => unreachable!("TilePos only has 2 dimensions"),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.0.x,
            1 => &mut self.0.y,
            _ => unreachable!("TilePos only has 2 dimensions"),
        }
    }
}

/// A tile kind at a grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacedTile {
    pub pos: TilePos,
    pub kind: TileKind,
}

impl PlacedTile {
    pub fn new(pos: TilePos, kind: TileKind) -> Self {
        Self { pos, kind }
    }
}
