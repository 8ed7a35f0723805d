use tilecraft_simulation::{TILE_SIZE, TileKind, chunk_column_span};

use super::noise_source::NoiseSource;
use super::rng_trait::{WorldRng, chunk_rng};
use super::structure_placement::{StructurePlacement, choose_structure, place_structure};
use super::tile::{PlacedTile, TilePos};
use super::worldgen_config::WorldGenConfig;

/// Everything one chunk contributes to the world, in install order
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkTiles {
    pub chunk_index: i32,
    /// Ground columns first, then structure tiles; later entries win
    pub tiles: Vec<PlacedTile>,
    pub structures: Vec<StructurePlacement>,
}

/// Terrain generator: chunk index -> tiles
///
/// Output is a pure function of seed, config and chunk index. Structure
/// draws come from an RNG seeded per chunk, so generation order does not
/// matter and chunks can be generated on any thread.
pub struct TerrainGenerator {
    pub seed: u64,
    config: WorldGenConfig,
    noise: NoiseSource,
}

impl TerrainGenerator {
    /// Create a generator with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::from_config(seed, WorldGenConfig::default())
    }

    pub fn from_config(seed: u64, config: WorldGenConfig) -> Self {
        let noise = NoiseSource::new(seed, &config.noise);
        Self {
            seed,
            config,
            noise,
        }
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// First tile row below the world's bottom bound
    pub fn bottom_row(&self) -> i32 {
        let height = self.config.world.world_height;
        (height + TILE_SIZE - 1).div_euclid(TILE_SIZE)
    }

    /// Surface height in world units for tile column `gx`, before snapping
    pub fn ground_y(&self, gx: i32) -> i32 {
        let noise = &self.config.noise;
        let world_height = self.config.world.world_height;

        let x = (gx * TILE_SIZE) as f32;
        let nx = x / noise.input_divisor;
        let height01 = self.noise.height_at(nx * noise.scale);

        (height01 * (world_height as f32 / 2.0)) as i32 + world_height / 3
    }

    /// Row of the topmost solid tile in column `gx`
    pub fn ground_row(&self, gx: i32) -> i32 {
        self.ground_y(gx).div_euclid(TILE_SIZE)
    }

    /// Layer kind for a row `depth` tiles below the surface
    fn layer_kind(&self, depth: i32) -> TileKind {
        if depth == 0 {
            TileKind::Grass
        } else if depth < self.config.world.dirt_depth {
            TileKind::Dirt
        } else {
            TileKind::Stone
        }
    }

    fn has_headroom(&self, ground_row: i32) -> bool {
        let world_height = self.config.world.world_height;
        let headroom = self.config.structures.min_headroom_tiles * TILE_SIZE;
        ground_row * TILE_SIZE < world_height - headroom
    }

    /// Generate a complete chunk
    pub fn generate_chunk(&self, chunk_index: i32) -> ChunkTiles {
        let mut rng = chunk_rng(self.seed, chunk_index);
        let bottom = self.bottom_row();
        let mut tiles = Vec::new();
        let mut structures = Vec::new();

        for gx in chunk_column_span(chunk_index) {
            let ground = self.ground_row(gx);
            for gy in ground..bottom {
                tiles.push(PlacedTile::new(
                    TilePos::new(gx, gy),
                    self.layer_kind(gy - ground),
                ));
            }

            if rng.check_probability(self.config.structures.chance) && self.has_headroom(ground)
            {
                structures.push(StructurePlacement {
                    kind: choose_structure(&mut rng, &self.config.structures.tree),
                    ground: TilePos::new(gx, ground),
                });
            }
        }

        for placement in &structures {
            place_structure(&mut tiles, *placement);
        }

        log::debug!(
            "[GEN] Chunk {} -> {} tiles, {} structures",
            chunk_index,
            tiles.len(),
            structures.len()
        );

        ChunkTiles {
            chunk_index,
            tiles,
            structures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::structure_placement::StructureKind;
    use crate::world::worldgen_config::StructureParams;
    use ahash::AHashMap;
    use tilecraft_simulation::CHUNK_SIZE;

    fn resolve(chunk: &ChunkTiles) -> AHashMap<TilePos, TileKind> {
        chunk.tiles.iter().map(|t| (t.pos, t.kind)).collect()
    }

    fn bare_config() -> WorldGenConfig {
        WorldGenConfig {
            structures: StructureParams {
                chance: 0.0,
                ..StructureParams::default()
            },
            ..WorldGenConfig::default()
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let gen1 = TerrainGenerator::new(42);
        let gen2 = TerrainGenerator::new(42);

        for chunk in -3..=3 {
            assert_eq!(gen1.generate_chunk(chunk), gen2.generate_chunk(chunk));
        }
    }

    #[test]
    fn test_generation_order_does_not_matter() {
        let generator = TerrainGenerator::new(9);
        let forward: Vec<ChunkTiles> = (0..4).map(|c| generator.generate_chunk(c)).collect();
        let backward: Vec<ChunkTiles> =
            (0..4).rev().map(|c| generator.generate_chunk(c)).collect();
        for (a, b) in forward.iter().zip(backward.iter().rev()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_chunk_zero_covers_sixteen_columns() {
        let generator = TerrainGenerator::from_config(42, bare_config());
        let chunk = generator.generate_chunk(0);

        let mut columns: Vec<i32> = chunk.tiles.iter().map(|t| t.pos.x()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns, (0..CHUNK_SIZE).collect::<Vec<_>>());
        assert!(chunk.structures.is_empty());
    }

    #[test]
    fn test_column_layering() {
        let generator = TerrainGenerator::from_config(7, bare_config());
        let chunk = generator.generate_chunk(-2);
        let tiles = resolve(&chunk);
        let bottom = generator.bottom_row();
        assert_eq!(bottom, 19);

        for gx in chunk_column_span(-2) {
            let ground = generator.ground_row(gx);
            assert_eq!(tiles.get(&TilePos::new(gx, ground - 1)), None);
            assert_eq!(tiles.get(&TilePos::new(gx, ground)), Some(&TileKind::Grass));
            assert_eq!(tiles.get(&TilePos::new(gx, ground + 1)), Some(&TileKind::Dirt));
            assert_eq!(tiles.get(&TilePos::new(gx, ground + 2)), Some(&TileKind::Dirt));
            assert_eq!(tiles.get(&TilePos::new(gx, ground + 3)), Some(&TileKind::Stone));
            assert_eq!(tiles.get(&TilePos::new(gx, bottom - 1)), Some(&TileKind::Stone));
            assert_eq!(tiles.get(&TilePos::new(gx, bottom)), None);
        }
    }

    #[test]
    fn test_ground_stays_in_expected_band() {
        let generator = TerrainGenerator::new(1234);
        for gx in -200..200 {
            let y = generator.ground_y(gx);
            // height01 in [0, 1] maps to [200, 500]
            assert!((200..=500).contains(&y), "ground_y {y} at column {gx}");
        }
    }

    #[test]
    fn test_structures_only_with_headroom() {
        let mut config = WorldGenConfig::default();
        config.structures.chance = 1.0;
        let generator = TerrainGenerator::from_config(5, config);

        for chunk_index in -4..4 {
            let chunk = generator.generate_chunk(chunk_index);
            for gx in chunk_column_span(chunk_index) {
                let ground = generator.ground_row(gx);
                let placed = chunk.structures.iter().any(|s| s.ground.x() == gx);
                assert_eq!(placed, ground * TILE_SIZE < 600 - 5 * TILE_SIZE);
            }
            for structure in &chunk.structures {
                if let StructureKind::Tree { trunk_height } = structure.kind {
                    assert!((3..=5).contains(&trunk_height));
                }
            }
        }
    }

    #[test]
    fn test_structure_tiles_follow_ground_tiles() {
        let mut config = WorldGenConfig::default();
        config.structures.chance = 1.0;
        let generator = TerrainGenerator::from_config(77, config);
        let chunk = generator.generate_chunk(0);

        let bottom = generator.bottom_row();
        let ground_count: usize = chunk_column_span(0)
            .map(|gx| (bottom - generator.ground_row(gx)) as usize)
            .sum();

        let mut expected_structures = Vec::new();
        for placement in &chunk.structures {
            place_structure(&mut expected_structures, *placement);
        }

        assert_eq!(chunk.tiles.len(), ground_count + expected_structures.len());
        assert_eq!(&chunk.tiles[ground_count..], expected_structures.as_slice());
        assert!(
            chunk.tiles[..ground_count]
                .iter()
                .all(|t| matches!(t.kind, TileKind::Grass | TileKind::Dirt | TileKind::Stone))
        );
    }

    #[test]
    fn test_seed_changes_world() {
        let a = TerrainGenerator::new(1);
        let b = TerrainGenerator::new(2);
        let differs = (-5..5).any(|c| a.generate_chunk(c) != b.generate_chunk(c));
        assert!(differs);
    }
}
