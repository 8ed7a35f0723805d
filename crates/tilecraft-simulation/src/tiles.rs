//! Tile kinds and their presentation attributes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain material occupying a grid cell
///
/// Every kind blocks movement; there is no non-solid tile. The discriminant
/// order is the hotbar order (hotkey `1` selects `Dirt`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    Dirt = 0,
    Stone = 1,
    Grass = 2,
    Wood = 3,
    Leaves = 4,
    Water = 5,
    Sand = 6,
}

impl TileKind {
    /// Number of selectable kinds
    pub const COUNT: usize = 7;

    /// All kinds in hotbar order
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Dirt,
        TileKind::Stone,
        TileKind::Grass,
        TileKind::Wood,
        TileKind::Leaves,
        TileKind::Water,
        TileKind::Sand,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by hotbar index
    pub fn from_index(index: usize) -> Option<TileKind> {
        Self::ALL.get(index).copied()
    }

    /// Step through the hotbar by `steps`, wrapping in both directions
    pub fn cycled(self, steps: i32) -> TileKind {
        let count = Self::COUNT as i32;
        let next = (self.index() as i32 + steps).rem_euclid(count);
        Self::ALL[next as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Dirt => "Dirt",
            TileKind::Stone => "Stone",
            TileKind::Grass => "Grass",
            TileKind::Wood => "Wood",
            TileKind::Leaves => "Leaves",
            TileKind::Water => "Water",
            TileKind::Sand => "Sand",
        }
    }

    /// Single-character glyph for text renderers
    pub fn glyph(self) -> char {
        match self {
            TileKind::Dirt => 'd',
            TileKind::Stone => '#',
            TileKind::Grass => '"',
            TileKind::Wood => '|',
            TileKind::Leaves => '*',
            TileKind::Water => '~',
            TileKind::Sand => '.',
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
