//! World controller - owns the store and the player, runs one tick at a time

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilecraft_simulation::{TILE_SIZE, TileKind, chunk_index_for_x};

use super::collision::Aabb;
use super::generation::TerrainGenerator;
use super::snapshot::FrameSnapshot;
use super::structure_placement::STRUCTURE_REACH;
use super::tile::{PlacedTile, TilePos};
use super::world_store::{LoadReport, WorldStore};
use super::worldgen_config::{ConfigError, WorldGenConfig};
use crate::entity::{InputState, PlayerBody, PlayerPhysicsConfig, TileSelector, VerticalContact};

/// Session parameters for a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub seed: u64,
    /// Chunks kept generated on each side of the player's chunk
    pub render_distance: i32,
    pub view_width: f32,
    pub view_height: f32,
    /// Requested top-left spawn position; lifted clear of terrain
    pub spawn: Vec2,
    pub physics: PlayerPhysicsConfig,
    pub worldgen: WorldGenConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            render_distance: 2,
            view_width: 800.0,
            view_height: 600.0,
            spawn: Vec2::new(400.0, 100.0),
            physics: PlayerPhysicsConfig::default(),
            worldgen: WorldGenConfig::default(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.worldgen.validate()?;
        if self.render_distance < 0 {
            return Err(ConfigError::RenderDistance(self.render_distance));
        }
        for (field, value) in [
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("physics.width", self.physics.width),
            ("physics.height", self.physics.height),
            ("physics.move_speed", self.physics.move_speed),
            ("physics.gravity", self.physics.gravity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let jump_force = self.physics.jump_force;
        if !(jump_force.is_finite() && jump_force < 0.0) {
            return Err(ConfigError::NotNegative {
                field: "physics.jump_force",
                value: jump_force,
            });
        }
        Ok(())
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub jumped: bool,
    /// A tile cut the horizontal move short
    pub blocked: bool,
    pub load: LoadReport,
    pub placed: Option<PlacedTile>,
    pub removed: Option<PlacedTile>,
    pub contact: VerticalContact,
    pub frame: FrameSnapshot,
}

/// Owns the world and the player and advances them one tick at a time
pub struct WorldController {
    store: WorldStore,
    player: PlayerBody,
    generator: TerrainGenerator,
    selector: TileSelector,
    config: ControllerConfig,
    camera_x: f32,
    ticks: u64,
}

impl WorldController {
    /// Validate `config`, generate the spawn area and place the player
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Controller with default settings and the given world seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(ControllerConfig {
            seed,
            ..ControllerConfig::default()
        })
    }

    fn build(config: ControllerConfig) -> Self {
        let generator = TerrainGenerator::from_config(config.seed, config.worldgen.clone());
        let player = PlayerBody::with_physics(config.spawn, config.physics);

        let mut controller = Self {
            store: WorldStore::new(),
            player,
            generator,
            selector: TileSelector::new(),
            config,
            camera_x: 0.0,
            ticks: 0,
        };
        controller.load_around_player();
        controller.lift_clear_of_tiles();
        controller.follow_player();

        log::info!(
            "World ready: seed {}, {} tiles, player at ({:.1}, {:.1})",
            controller.config.seed,
            controller.store.len(),
            controller.player.position.x,
            controller.player.position.y
        );
        controller
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WorldStore {
        &mut self.store
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player
    }

    pub fn selector(&self) -> &TileSelector {
        &self.selector
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick
    ///
    /// Order: intents (selection, jump), horizontal move, chunk streaming,
    /// edits, gravity, snapshot. Chunks under the move region are generated
    /// before the move is resolved, whatever the render distance.
    pub fn tick(&mut self, input: &InputState) -> TickReport {
        let intents = input.intents();

        // 1. Intents
        if let Some(key) = intents.hotkey
            && !self.selector.select_hotkey(key)
        {
            log::trace!("Ignoring hotkey {}", key);
        }
        if intents.scroll != 0 {
            self.selector.scroll(intents.scroll);
        }
        let jumped = intents.jump && self.player.jump();

        // 2. Horizontal movement
        let mut load = LoadReport::default();
        let mut blocked = false;
        if intents.direction != 0 {
            let dx = f32::from(intents.direction) * self.player.physics().move_speed;
            let region = self.player.move_region(dx);
            load = self
                .store
                .ensure_chunks_loaded(chunks_within_reach(region), &self.generator);
            let solids = self.store.candidates_near(region);
            blocked = self.player.move_horizontal(dx, &solids);
            log::trace!(
                "Moved by {} to x={} ({} candidates, blocked: {})",
                dx,
                self.player.position.x,
                solids.len(),
                blocked
            );
        }
        self.follow_player();

        // 3. Chunk streaming
        load.merge(self.load_around_player());

        // 4. Edits
        let selected = self.selector.selected();
        let placed = intents
            .place_at
            .and_then(|screen| self.place_at_screen(screen, selected));
        let removed = intents
            .remove_at
            .and_then(|screen| self.remove_at_screen(screen));

        // 5. Gravity
        let solids = self.store.candidates_near(self.player.fall_region());
        let contact = self.player.apply_gravity(&solids);

        // 6. Snapshot
        self.ticks += 1;
        TickReport {
            tick: self.ticks,
            jumped,
            blocked,
            load,
            placed,
            removed,
            contact,
            frame: self.snapshot(),
        }
    }

    /// World position under a screen position
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x + self.camera_x, screen.y)
    }

    /// Place `kind` in the cell under `screen`
    ///
    /// Only an empty cell that does not intersect the player is filled.
    pub fn place_at_screen(&mut self, screen: Vec2, kind: TileKind) -> Option<PlacedTile> {
        let pos = TilePos::from_world(self.screen_to_world(screen));
        let cell = Aabb::from_tile(pos);

        if !self.store.candidates_near(cell).is_empty() {
            log::trace!("[EDIT] Cell ({}, {}) occupied, not placing", pos.x(), pos.y());
            return None;
        }
        if cell.overlaps(&self.player.aabb()) {
            log::trace!("[EDIT] Cell ({}, {}) overlaps player", pos.x(), pos.y());
            return None;
        }

        self.store.insert(pos, kind);
        log::debug!("[EDIT] Placed {} at ({}, {})", kind, pos.x(), pos.y());
        Some(PlacedTile::new(pos, kind))
    }

    /// Remove the tile under `screen`, if any
    pub fn remove_at_screen(&mut self, screen: Vec2) -> Option<PlacedTile> {
        let world = self.screen_to_world(screen);
        let pos = self.store.query_point(world.x, world.y)?;
        let kind = self.store.remove(pos)?;
        log::debug!("[EDIT] Removed {} at ({}, {})", kind, pos.x(), pos.y());
        Some(PlacedTile::new(pos, kind))
    }

    /// Presentation data for the current state
    pub fn snapshot(&self) -> FrameSnapshot {
        let t = TILE_SIZE as f32;
        // A tile is drawn while its left edge is in [-TILE_SIZE, view_width] on screen
        let first = ((self.camera_x - t) / t).ceil() as i32;
        let last = ((self.camera_x + self.config.view_width) / t).floor() as i32;

        let visible_tiles = self
            .store
            .tiles_in_columns(first..=last)
            .into_iter()
            .map(|tile| (Aabb::from_tile(tile.pos), tile.kind))
            .collect();

        FrameSnapshot {
            visible_tiles,
            player_box: self.player.aabb(),
            selected: self.selector.selected(),
            selected_label: self.selector.label(),
            camera_x: self.camera_x,
        }
    }

    /// Chunk indices that must be generated around the player
    ///
    /// The render distance is counted from every chunk the body touches, so a
    /// body straddling a chunk border has both sides loaded.
    pub fn required_chunks(&self) -> std::ops::RangeInclusive<i32> {
        let body = self.player.aabb();
        let distance = self.config.render_distance;
        chunk_index_for_x(body.left()) - distance..=chunk_index_for_x(body.right()) + distance
    }

    /// Load the render window plus every chunk whose structures could reach the body
    fn load_around_player(&mut self) -> LoadReport {
        let window = self.required_chunks();
        let reach = chunks_within_reach(self.player.aabb());
        let range = *window.start().min(reach.start())..=*window.end().max(reach.end());
        self.store.ensure_chunks_loaded(range, &self.generator)
    }

    fn follow_player(&mut self) {
        self.camera_x = self.player.position.x - self.config.view_width / 2.0;
    }

    /// Move the player up until it stands above every tile it overlaps
    fn lift_clear_of_tiles(&mut self) {
        let body = self.player.aabb();
        if self.store.candidates_near(body).is_empty() {
            return;
        }

        let t = TILE_SIZE as f32;
        let first = (body.left() / t).floor() as i32;
        let last = (body.right() / t).ceil() as i32 - 1;
        let highest_top = self
            .store
            .tiles_in_columns(first..=last)
            .iter()
            .filter(|tile| (tile.pos.y() as f32 * t) < body.bottom())
            .map(|tile| tile.pos.y())
            .min();

        if let Some(row) = highest_top {
            let y = row as f32 * t - body.size.y;
            log::debug!(
                "Spawn overlaps terrain, lifting player from y={} to y={}",
                body.top(),
                y
            );
            self.player.teleport(Vec2::new(body.left(), y));
        }
    }
}

/// Chunks holding any column within `STRUCTURE_REACH` of `region`
///
/// Once these are generated, no later chunk can write a tile inside `region`.
fn chunks_within_reach(region: Aabb) -> std::ops::RangeInclusive<i32> {
    let reach = (STRUCTURE_REACH * TILE_SIZE) as f32;
    chunk_index_for_x(region.left() - reach)..=chunk_index_for_x(region.right() + reach)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_controller() -> WorldController {
        let mut config = ControllerConfig::default();
        config.worldgen.structures.chance = 0.0;
        WorldController::new(config).expect("default config is valid")
    }

    #[test]
    fn test_spawn_loads_render_distance() {
        let controller = flat_controller();
        let generated: Vec<i32> = controller.store().generated_chunks().collect();
        assert_eq!(generated, vec![-2, -1, 0, 1, 2]);
        assert_eq!(controller.camera_x(), 0.0);
    }

    #[test]
    fn test_spawn_never_overlaps_terrain() {
        for seed in 0..20 {
            let mut config = ControllerConfig {
                seed,
                spawn: Vec2::new(400.0, 400.0),
                ..ControllerConfig::default()
            };
            config.worldgen.structures.chance = 1.0;
            let controller = WorldController::new(config).expect("valid");
            let body = controller.player().aabb();
            assert!(controller.store().candidates_near(body).is_empty());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ControllerConfig {
            render_distance: -1,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            WorldController::new(config),
            Err(ConfigError::RenderDistance(-1))
        ));

        let config = ControllerConfig {
            view_width: 0.0,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            WorldController::new(config),
            Err(ConfigError::NonPositive { field: "view_width", .. })
        ));
    }

    #[test]
    fn test_physics_signs_validated() {
        let mut config = ControllerConfig::default();
        config.physics.gravity = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "physics.gravity", .. })
        ));

        let mut config = ControllerConfig::default();
        config.physics.jump_force = 10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotNegative { field: "physics.jump_force", .. })
        ));

        let mut config = ControllerConfig::default();
        config.physics.move_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "physics.move_speed", .. })
        ));

        // Fast movement and a zero render distance are both valid
        let mut config = ControllerConfig {
            render_distance: 0,
            ..ControllerConfig::default()
        };
        config.physics.move_speed = 2000.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_move_loads_chunks_under_move_region() {
        let mut config = ControllerConfig {
            render_distance: 0,
            ..ControllerConfig::default()
        };
        config.worldgen.structures.chance = 0.0;
        config.physics.move_speed = 1200.0;
        let mut controller = WorldController::new(config).expect("valid");
        // Spawn body spans x 400..432; structure reach pulls in chunk 1
        assert_eq!(controller.store().generated_chunks().collect::<Vec<_>>(), vec![0, 1]);

        // Lift the body into the sky so nothing blocks the long step
        controller.player_mut().teleport(Vec2::new(400.0, 0.0));
        let report = controller.tick(&InputState {
            move_right: true,
            ..InputState::default()
        });

        assert_eq!(report.load.chunks_generated, vec![2, 3]);
        assert!(!report.blocked);
        assert_eq!(controller.player().position.x, 1600.0);
    }

    #[test]
    fn test_required_chunks_cover_straddling_body() {
        let config = ControllerConfig {
            render_distance: 0,
            spawn: Vec2::new(500.0, 0.0),
            ..ControllerConfig::default()
        };
        let controller = WorldController::new(config).expect("valid");
        assert_eq!(controller.required_chunks(), 0..=1);
        assert!(controller.store().is_generated(1));
    }

    #[test]
    fn test_screen_to_world_follows_camera() {
        let mut controller = flat_controller();
        controller.player_mut().position.x = 1000.0;
        controller.follow_player();
        assert_eq!(controller.camera_x(), 600.0);
        assert_eq!(
            controller.screen_to_world(Vec2::new(10.0, 20.0)),
            Vec2::new(610.0, 20.0)
        );
    }

    #[test]
    fn test_snapshot_window() {
        let mut controller = flat_controller();
        controller.store_mut().insert(TilePos::new(-1, 0), TileKind::Sand);
        controller.store_mut().insert(TilePos::new(-2, 0), TileKind::Sand);
        controller.store_mut().insert(TilePos::new(25, 0), TileKind::Sand);
        controller.store_mut().insert(TilePos::new(26, 0), TileKind::Sand);

        let frame = controller.snapshot();
        let columns: Vec<i32> = frame
            .visible_tiles
            .iter()
            .map(|(b, _)| b.left() as i32 / TILE_SIZE)
            .collect();
        assert_eq!(columns.first(), Some(&-1));
        assert_eq!(columns.last(), Some(&25));
        assert_eq!(frame.tile_at(-20.0, 5.0), Some(TileKind::Sand));
        assert_eq!(frame.selected_label, "Selected Block: Dirt");
    }
}
