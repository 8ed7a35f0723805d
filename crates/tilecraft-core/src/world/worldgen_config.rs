//! World generation configuration - serializable parameters for terrain generation
//!
//! The seed is NOT part of the config: same config + different seed = different
//! world. Configs serialize to RON so presets can be stored alongside the game
//! config and tweaked without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when a generation config is parsed or validated
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("noise octaves must be at least 1")]
    NoOctaves,

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be negative and finite, got {value}")]
    NotNegative { field: &'static str, value: f32 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f32 },

    #[error("tree trunk range {min}..={max} is empty or not positive")]
    TrunkRange { min: i32, max: i32 },

    #[error("world height {0} must hold at least one tile row")]
    WorldHeight(i32),

    #[error("render distance {0} must not be negative")]
    RenderDistance(i32),

    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Complete world generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldGenConfig {
    /// Display name for this configuration
    pub name: String,

    /// Vertical extent and soil layering
    pub world: WorldParams,

    /// Height noise parameters
    pub noise: NoiseParams,

    /// Tree and house placement
    pub structures: StructureParams,
}

/// Vertical world bounds and soil layering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    /// World units from y=0 down to the bottom bound (default: 600)
    pub world_height: i32,
    /// Soil depth in rows counted from the grass row: rows closer than this
    /// below the surface are dirt, deeper rows are stone (default: 3)
    pub dirt_depth: i32,
}

/// Fractal noise parameters for the ground height profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Number of fractal octaves (default: 6)
    pub octaves: u8,
    /// Amplitude multiplier per octave (default: 0.5)
    pub persistence: f32,
    /// Frequency multiplier per octave (default: 2.0)
    pub lacunarity: f32,
    /// World x is divided by this before scaling (default: 1000.0)
    pub input_divisor: f32,
    /// Multiplier applied to the divided coordinate (default: 50.0)
    pub scale: f32,
}

/// Structure placement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureParams {
    /// Per-column chance of placing a structure (default: 0.1)
    pub chance: f32,
    /// Minimum tile rows between the ground and the bottom bound (default: 5)
    pub min_headroom_tiles: i32,
    /// Tree trunk sizing
    pub tree: TreeConfig,
}

/// Tree trunk height range in tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub min_trunk: i32,
    pub max_trunk: i32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            world: WorldParams::default(),
            noise: NoiseParams::default(),
            structures: StructureParams::default(),
        }
    }
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            world_height: 600,
            dirt_depth: 3,
        }
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            input_divisor: 1000.0,
            scale: 50.0,
        }
    }
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            chance: 0.1,
            min_headroom_tiles: 5,
            tree: TreeConfig::default(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_trunk: 3,
            max_trunk: 5,
        }
    }
}

impl WorldGenConfig {
    /// Gentle single-octave hills with sparse structures (good for building)
    pub fn preset_flat() -> Self {
        Self {
            name: "Flat".to_string(),
            noise: NoiseParams {
                octaves: 1,
                scale: 5.0,
                ..NoiseParams::default()
            },
            structures: StructureParams {
                chance: 0.03,
                ..StructureParams::default()
            },
            ..Self::default()
        }
    }

    /// Dense structures and taller trees
    pub fn preset_forest() -> Self {
        Self {
            name: "Forest".to_string(),
            structures: StructureParams {
                chance: 0.3,
                tree: TreeConfig {
                    min_trunk: 4,
                    max_trunk: 7,
                },
                ..StructureParams::default()
            },
            ..Self::default()
        }
    }

    /// Look up a preset by case-insensitive name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default()),
            "flat" => Some(Self::preset_flat()),
            "forest" => Some(Self::preset_forest()),
            _ => None,
        }
    }

    /// Check parameter ranges the generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.noise.octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }
        for (field, value) in [
            ("noise.lacunarity", self.noise.lacunarity),
            ("noise.input_divisor", self.noise.input_divisor),
            ("noise.scale", self.noise.scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("noise.persistence", self.noise.persistence),
            ("structures.chance", self.structures.chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { field, value });
            }
        }
        let tree = &self.structures.tree;
        if tree.min_trunk < 1 || tree.max_trunk < tree.min_trunk {
            return Err(ConfigError::TrunkRange {
                min: tree.min_trunk,
                max: tree.max_trunk,
            });
        }
        if self.world.world_height < tilecraft_simulation::TILE_SIZE {
            return Err(ConfigError::WorldHeight(self.world.world_height));
        }
        Ok(())
    }

    /// Parse and validate a RON document
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}
