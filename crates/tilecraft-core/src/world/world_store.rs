//! Sparse tile storage with an R-tree index and lazy chunk population

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use ahash::AHashMap;
use glam::Vec2;
use rstar::{AABB, RTree};
use tilecraft_simulation::{TILE_SIZE, TileKind};

use super::collision::Aabb;
use super::generation::{ChunkTiles, TerrainGenerator};
use super::tile::{PlacedTile, TilePos};

/// What one `ensure_chunks_loaded` call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Newly generated chunk indices, ascending
    pub chunks_generated: Vec<i32>,
    /// Tile writes performed while installing them
    pub tiles_inserted: usize,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.chunks_generated.is_empty()
    }

    /// Fold a later load into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.chunks_generated.extend(other.chunks_generated);
        self.chunks_generated.sort_unstable();
        self.tiles_inserted += other.tiles_inserted;
    }
}

/// Tile map keyed by grid coordinate plus the set of generated chunks
///
/// The R-tree mirrors the key set of `tiles` and answers region queries;
/// every insert or remove updates both.
pub struct WorldStore {
    tiles: AHashMap<TilePos, TileKind>,

    /// Spatial index for region queries (O(log n) lookup)
    spatial_index: RTree<TilePos>,

    generated: BTreeSet<i32>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            tiles: AHashMap::new(),
            spatial_index: RTree::new(),
            generated: BTreeSet::new(),
        }
    }

    /// Insert or overwrite the tile at `pos`
    pub fn insert(&mut self, pos: TilePos, kind: TileKind) {
        if self.tiles.insert(pos, kind).is_none() {
            self.spatial_index.insert(pos);
        }
    }

    /// Remove the tile at `pos`, returning what was there
    pub fn remove(&mut self, pos: TilePos) -> Option<TileKind> {
        let removed = self.tiles.remove(&pos)?;
        self.spatial_index.remove(&pos);
        Some(removed)
    }

    pub fn get(&self, pos: TilePos) -> Option<TileKind> {
        self.tiles.get(&pos).copied()
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.tiles.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Grid coordinate of the tile containing the world point, if one exists
    pub fn query_point(&self, world_x: f32, world_y: f32) -> Option<TilePos> {
        let pos = TilePos::from_world(Vec2::new(world_x, world_y));
        self.contains(pos).then_some(pos)
    }

    /// Boxes of all tiles overlapping `region`; every tile is solid
    pub fn candidates_near(&self, region: Aabb) -> Vec<Aabb> {
        let t = TILE_SIZE as f32;
        let min = TilePos::new(
            (region.left() / t).floor() as i32,
            (region.top() / t).floor() as i32,
        );
        let max = TilePos::new(
            (region.right() / t).ceil() as i32 - 1,
            (region.bottom() / t).ceil() as i32 - 1,
        );
        if max.x() < min.x() || max.y() < min.y() {
            return Vec::new();
        }

        let envelope = AABB::from_corners(min, max);
        self.spatial_index
            .locate_in_envelope(&envelope)
            .map(|pos| Aabb::from_tile(*pos))
            .filter(|tile| tile.overlaps(&region))
            .collect()
    }

    /// Tiles in columns `columns`, sorted by position
    pub fn tiles_in_columns(&self, columns: RangeInclusive<i32>) -> Vec<PlacedTile> {
        let envelope = AABB::from_corners(
            TilePos::new(*columns.start(), i32::MIN),
            TilePos::new(*columns.end(), i32::MAX),
        );
        let mut found: Vec<PlacedTile> = self
            .spatial_index
            .locate_in_envelope(&envelope)
            .filter_map(|pos| self.get(*pos).map(|kind| PlacedTile::new(*pos, kind)))
            .collect();
        found.sort_unstable();
        found
    }

    /// Every tile, sorted by position
    pub fn snapshot(&self) -> Vec<PlacedTile> {
        let mut all: Vec<PlacedTile> = self
            .tiles
            .iter()
            .map(|(pos, kind)| PlacedTile::new(*pos, *kind))
            .collect();
        all.sort_unstable();
        all
    }

    pub fn is_generated(&self, chunk_index: i32) -> bool {
        self.generated.contains(&chunk_index)
    }

    /// Generated chunk indices, ascending
    pub fn generated_chunks(&self) -> impl Iterator<Item = i32> + '_ {
        self.generated.iter().copied()
    }

    /// Generate and install every chunk in `range` not generated yet
    ///
    /// Missing chunks are generated in parallel, then installed one at a time
    /// in ascending order. A chunk is marked generated only once all of its
    /// tiles are in place.
    pub fn ensure_chunks_loaded(
        &mut self,
        range: RangeInclusive<i32>,
        generator: &TerrainGenerator,
    ) -> LoadReport {
        let missing: Vec<i32> = range.filter(|c| !self.is_generated(*c)).collect();
        if missing.is_empty() {
            log::trace!("[LOAD] All requested chunks already generated, skipping");
            return LoadReport::default();
        }

        let mut report = LoadReport::default();
        for chunk in generate_chunks(generator, &missing) {
            report.tiles_inserted += self.install_chunk(chunk, &mut report.chunks_generated);
        }

        log::debug!(
            "[LOAD] Generated chunks {:?} ({} tiles, {} total)",
            report.chunks_generated,
            report.tiles_inserted,
            self.tiles.len()
        );
        report
    }

    fn install_chunk(&mut self, chunk: ChunkTiles, installed: &mut Vec<i32>) -> usize {
        let count = chunk.tiles.len();
        for tile in chunk.tiles {
            self.insert(tile.pos, tile.kind);
        }
        self.generated.insert(chunk.chunk_index);
        installed.push(chunk.chunk_index);
        count
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate `indices` in order, in parallel where threads are available
fn generate_chunks(generator: &TerrainGenerator, indices: &[i32]) -> Vec<ChunkTiles> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rayon::prelude::*;
        indices
            .par_iter()
            .map(|&index| generator.generate_chunk(index))
            .collect()
    }

    #[cfg(target_arch = "wasm32")]
    {
        indices
            .iter()
            .map(|&index| generator.generate_chunk(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecraft_simulation::CHUNK_WIDTH;

    #[test]
    fn test_insert_overwrites_and_remove() {
        let mut store = WorldStore::new();
        let pos = TilePos::new(3, -2);
        store.insert(pos, TileKind::Dirt);
        store.insert(pos, TileKind::Sand);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(pos), Some(TileKind::Sand));

        assert_eq!(store.remove(pos), Some(TileKind::Sand));
        assert_eq!(store.remove(pos), None);
        assert!(store.is_empty());
        assert!(store.candidates_near(Aabb::from_tile(pos)).is_empty());
    }

    #[test]
    fn test_query_point_uses_floor() {
        let mut store = WorldStore::new();
        store.insert(TilePos::new(-1, 0), TileKind::Stone);
        assert_eq!(store.query_point(-0.5, 5.0), Some(TilePos::new(-1, 0)));
        assert_eq!(store.query_point(-32.0, 31.9), Some(TilePos::new(-1, 0)));
        assert_eq!(store.query_point(0.0, 5.0), None);
        assert_eq!(store.query_point(-33.0, 5.0), None);
    }

    #[test]
    fn test_candidates_near_matches_linear_scan() {
        let mut store = WorldStore::new();
        for gx in -6..6 {
            for gy in 0..6 {
                if (gx + gy) % 3 != 0 {
                    store.insert(TilePos::new(gx, gy), TileKind::Stone);
                }
            }
        }

        let region = Aabb::new(-50.0, 20.0, 90.0, 70.0);
        let mut fast = store.candidates_near(region);
        let mut slow: Vec<Aabb> = store
            .snapshot()
            .into_iter()
            .map(|t| Aabb::from_tile(t.pos))
            .filter(|b| b.overlaps(&region))
            .collect();

        let key = |b: &Aabb| (b.min.x as i32, b.min.y as i32);
        fast.sort_by_key(key);
        slow.sort_by_key(key);
        assert!(!fast.is_empty());
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_candidates_exclude_edge_touching_tiles() {
        let mut store = WorldStore::new();
        store.insert(TilePos::new(1, 0), TileKind::Stone);
        // Region ends exactly at x = 32
        let region = Aabb::new(0.0, 0.0, 32.0, 32.0);
        assert!(store.candidates_near(region).is_empty());
    }

    #[test]
    fn test_tiles_in_columns_sorted() {
        let mut store = WorldStore::new();
        store.insert(TilePos::new(2, 5), TileKind::Grass);
        store.insert(TilePos::new(1, 9), TileKind::Dirt);
        store.insert(TilePos::new(1, -3), TileKind::Wood);
        store.insert(TilePos::new(4, 0), TileKind::Sand);

        let found = store.tiles_in_columns(1..=2);
        assert_eq!(
            found,
            vec![
                PlacedTile::new(TilePos::new(1, -3), TileKind::Wood),
                PlacedTile::new(TilePos::new(1, 9), TileKind::Dirt),
                PlacedTile::new(TilePos::new(2, 5), TileKind::Grass),
            ]
        );
    }

    #[test]
    fn test_tiles_in_columns_covers_every_row() {
        let mut store = WorldStore::new();
        store.insert(TilePos::new(3, 1 << 30), TileKind::Sand);
        store.insert(TilePos::new(3, 1 << 26), TileKind::Stone);
        store.insert(TilePos::new(3, -(1 << 28)), TileKind::Wood);

        let found = store.tiles_in_columns(3..=3);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&PlacedTile::new(TilePos::new(3, 1 << 26), TileKind::Stone)));
    }

    #[test]
    fn test_load_report_merge() {
        let mut report = LoadReport {
            chunks_generated: vec![3],
            tiles_inserted: 10,
        };
        report.merge(LoadReport {
            chunks_generated: vec![1, 2],
            tiles_inserted: 5,
        });
        assert_eq!(report.chunks_generated, vec![1, 2, 3]);
        assert_eq!(report.tiles_inserted, 15);
    }

    #[test]
    fn test_ensure_chunks_loaded_is_idempotent() {
        let generator = TerrainGenerator::new(42);
        let mut store = WorldStore::new();

        let first = store.ensure_chunks_loaded(0..=0, &generator);
        assert_eq!(first.chunks_generated, vec![0]);
        assert!(first.tiles_inserted > 0);
        let before = store.snapshot();

        let second = store.ensure_chunks_loaded(0..=0, &generator);
        assert!(second.is_empty());
        assert_eq!(second.tiles_inserted, 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_chunk_zero_spans_first_chunk_width() {
        let mut config = crate::world::WorldGenConfig::default();
        config.structures.chance = 0.0;
        let generator = TerrainGenerator::from_config(42, config);
        let mut store = WorldStore::new();
        store.ensure_chunks_loaded(0..=0, &generator);

        for tile in store.snapshot() {
            let x = tile.pos.world_origin().x;
            assert!((0.0..CHUNK_WIDTH as f32).contains(&x));
        }
    }

    #[test]
    fn test_edits_survive_reload() {
        let generator = TerrainGenerator::new(3);
        let mut store = WorldStore::new();
        store.ensure_chunks_loaded(-1..=1, &generator);

        let pos = TilePos::new(5, 1);
        store.insert(pos, TileKind::Sand);
        let report = store.ensure_chunks_loaded(-2..=2, &generator);
        assert_eq!(report.chunks_generated, vec![-2, 2]);
        assert_eq!(store.get(pos), Some(TileKind::Sand));
    }

    #[test]
    fn test_parallel_install_matches_sequential() {
        let generator = TerrainGenerator::new(11);

        let mut batch = WorldStore::new();
        batch.ensure_chunks_loaded(-3..=3, &generator);

        let mut one_by_one = WorldStore::new();
        for chunk in -3..=3 {
            one_by_one.ensure_chunks_loaded(chunk..=chunk, &generator);
        }

        assert_eq!(batch.snapshot(), one_by_one.snapshot());
        assert_eq!(
            batch.generated_chunks().collect::<Vec<_>>(),
            (-3..=3).collect::<Vec<_>>()
        );
    }
}
