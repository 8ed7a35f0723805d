//! Game configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `tilecraft.ron` file (if exists)
//! 3. Environment variables prefixed with `TILECRAFT_`
//!
//! Example environment variable: `TILECRAFT_WORLD__SEED=1234`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilecraft_core::entity::PlayerPhysicsConfig;
use tilecraft_core::world::{ControllerConfig, WorldGenConfig};

/// Default config file name, without extension
pub const DEFAULT_CONFIG_NAME: &str = "tilecraft";

/// Main game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// World generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    /// Generation preset: default, flat, forest
    pub preset: String,
    /// RON file with a full generation config; overrides `preset`
    #[serde(default)]
    pub worldgen_file: Option<PathBuf>,
    /// Chunks generated on each side of the player's chunk
    pub render_distance: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            preset: "default".to_string(),
            worldgen_file: None,
            render_distance: 2,
        }
    }
}

/// Player spawn and physics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Horizontal movement speed in units/tick
    pub move_speed: f32,
    /// Gravity in units/tick^2
    pub gravity: f32,
    /// Jump velocity in units/tick (negative is up)
    pub jump_force: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let physics = PlayerPhysicsConfig::default();
        Self {
            spawn_x: 400.0,
            spawn_y: 100.0,
            move_speed: physics.move_speed,
            gravity: physics.gravity,
            jump_force: physics.jump_force,
        }
    }
}

/// Viewport size in world units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Print an ASCII frame every N ticks (0 = only the final frame)
    pub frame_interval: u64,
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            frame_interval: 0,
            verbose_logging: false,
        }
    }
}

impl GameConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `<base>.ron` file (if exists)
    /// 3. Environment variables prefixed with `TILECRAFT_` (highest priority)
    pub fn load_from(base: &Path) -> Result<Self> {
        let defaults = Self::default();
        let base_name = base
            .to_str()
            .with_context(|| format!("Config path {:?} is not valid UTF-8", base))?;

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.seed", defaults.world.seed as i64)?
            .set_default("world.preset", defaults.world.preset.as_str())?
            .set_default("world.render_distance", i64::from(defaults.world.render_distance))?
            .set_default("player.spawn_x", f64::from(defaults.player.spawn_x))?
            .set_default("player.spawn_y", f64::from(defaults.player.spawn_y))?
            .set_default("player.move_speed", f64::from(defaults.player.move_speed))?
            .set_default("player.gravity", f64::from(defaults.player.gravity))?
            .set_default("player.jump_force", f64::from(defaults.player.jump_force))?
            .set_default("view.width", f64::from(defaults.view.width))?
            .set_default("view.height", f64::from(defaults.view.height))?
            .set_default("debug.frame_interval", defaults.debug.frame_interval as i64)?
            .set_default("debug.verbose_logging", defaults.debug.verbose_logging)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(base_name)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (TILECRAFT_WORLD__SEED, etc.)
            .add_source(
                Environment::with_prefix("TILECRAFT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Resolve the generation config from the worldgen file or the preset name
    pub fn worldgen(&self) -> Result<WorldGenConfig> {
        if let Some(path) = &self.world.worldgen_file {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read worldgen file {:?}", path))?;
            return WorldGenConfig::from_ron(&source)
                .with_context(|| format!("Invalid worldgen file {:?}", path));
        }

        match WorldGenConfig::preset(&self.world.preset) {
            Some(config) => Ok(config),
            None => bail!(
                "Unknown world preset '{}' (expected default, flat or forest)",
                self.world.preset
            ),
        }
    }

    /// Build the controller settings this config describes
    pub fn controller_config(&self) -> Result<ControllerConfig> {
        let physics = PlayerPhysicsConfig {
            move_speed: self.player.move_speed,
            gravity: self.player.gravity,
            jump_force: self.player.jump_force,
            ..PlayerPhysicsConfig::default()
        };

        let config = ControllerConfig {
            seed: self.world.seed,
            render_distance: self.world.render_distance,
            view_width: self.view.width,
            view_height: self.view.height,
            spawn: Vec2::new(self.player.spawn_x, self.player.spawn_y),
            physics,
            worldgen: self.worldgen()?,
        };
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}
