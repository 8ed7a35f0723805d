//! Structure templates stamped onto generated terrain
//!
//! Structures are emitted as ordered tile lists. Later entries overwrite
//! earlier ones when installed, which is how doors and windows replace wall
//! tiles. Nothing here checks occupancy or chunk bounds: a structure may spill
//! into a neighbouring chunk's columns.

use tilecraft_simulation::TileKind;

use super::rng_trait::WorldRng;
use super::tile::{PlacedTile, TilePos};
use super::worldgen_config::TreeConfig;

/// Width of a house in tiles
pub const HOUSE_WIDTH: i32 = 5;

/// Height of a house in tiles
pub const HOUSE_HEIGHT: i32 = 4;

/// Rows of leaves above the trunk
const CANOPY_ROWS: i32 = 3;

/// Canopy reaches this many columns either side of the trunk
const CANOPY_HALF_WIDTH: i32 = 2;

/// Furthest a structure reaches past its anchor column, in columns
pub const STRUCTURE_REACH: i32 = if HOUSE_WIDTH - 1 > CANOPY_HALF_WIDTH {
    HOUSE_WIDTH - 1
} else {
    CANOPY_HALF_WIDTH
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Tree { trunk_height: i32 },
    House,
}

/// A structure anchored on a column's ground tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructurePlacement {
    pub kind: StructureKind,
    /// Grass tile the structure stands on
    pub ground: TilePos,
}

/// Pick a structure uniformly between tree and house
pub fn choose_structure(rng: &mut impl WorldRng, tree: &TreeConfig) -> StructureKind {
    if rng.coin_flip() {
        StructureKind::Tree {
            trunk_height: rng.gen_range_inclusive(tree.min_trunk, tree.max_trunk),
        }
    } else {
        StructureKind::House
    }
}

/// Append the tiles of `placement` to `out`
pub fn place_structure(out: &mut Vec<PlacedTile>, placement: StructurePlacement) {
    match placement.kind {
        StructureKind::Tree { trunk_height } => place_tree(out, placement.ground, trunk_height),
        StructureKind::House => place_house(out, placement.ground),
    }
}

/// Wood trunk rising from `ground` with a leaf canopy above it
///
/// The canopy is widest on its lowest row and narrows on the top row. Leaves
/// at or above row 0 are dropped.
pub fn place_tree(out: &mut Vec<PlacedTile>, ground: TilePos, trunk_height: i32) {
    for dy in 1..=trunk_height {
        out.push(PlacedTile::new(ground.offset(0, -dy), TileKind::Wood));
    }

    let canopy_base = ground.y() - trunk_height - 1;
    for row in 0..CANOPY_ROWS {
        let y = canopy_base - row;
        if y < 1 {
            continue;
        }
        for dx in -CANOPY_HALF_WIDTH..=CANOPY_HALF_WIDTH {
            if dx.abs() + row > CANOPY_HALF_WIDTH + 1 {
                continue;
            }
            out.push(PlacedTile::new(
                TilePos::new(ground.x() + dx, y),
                TileKind::Leaves,
            ));
        }
    }
}

/// Solid stone house standing on `ground`, its left wall in the ground column
pub fn place_house(out: &mut Vec<PlacedTile>, ground: TilePos) {
    for dx in 0..HOUSE_WIDTH {
        for dy in 1..=HOUSE_HEIGHT {
            out.push(PlacedTile::new(ground.offset(dx, -dy), TileKind::Stone));
        }
    }

    let door_column = HOUSE_WIDTH / 2;
    for dy in 1..=2 {
        out.push(PlacedTile::new(
            ground.offset(door_column, -dy),
            TileKind::Wood,
        ));
    }

    for window_column in [1, HOUSE_WIDTH - 2] {
        out.push(PlacedTile::new(
            ground.offset(window_column, -3),
            TileKind::Water,
        ));
    }
}
