use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::world::{Aabb, Axis, sweep_axis};

/// Tunable player movement constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysicsConfig {
    /// Horizontal speed in world units per tick
    pub move_speed: f32,
    /// Added to vertical velocity every tick (positive is down)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_force: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerPhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: PlayerBody::MOVE_SPEED,
            gravity: PlayerBody::GRAVITY,
            jump_force: PlayerBody::JUMP_FORCE,
            width: PlayerBody::WIDTH,
            height: PlayerBody::HEIGHT,
        }
    }
}

/// Result of one vertical integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// Moved the full step
    Free,
    /// Stopped on top of a tile
    Landed,
    /// Stopped against the underside of a tile
    HeadBump,
}

/// The player's physical body
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    /// Top-left corner in world units
    pub position: Vec2,
    pub vel_y: f32,
    pub grounded: bool, // Standing on a tile since the last vertical step
    physics: PlayerPhysicsConfig,
}

impl PlayerBody {
    pub const WIDTH: f32 = 32.0;
    pub const HEIGHT: f32 = 48.0;

    // Physics constants (per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -10.0;
    pub const MOVE_SPEED: f32 = 5.0;

    /// Candidate regions are grown by this much so rounding at the far edge
    /// of a step never drops a tile the sweep would reach
    pub const REGION_PADDING: f32 = 1.0;

    /// Create a player at the specified top-left position with default physics
    pub fn new(position: Vec2) -> Self {
        Self::with_physics(position, PlayerPhysicsConfig::default())
    }

    pub fn with_physics(position: Vec2, physics: PlayerPhysicsConfig) -> Self {
        Self {
            position,
            vel_y: 0.0,
            grounded: false, // Start in air
            physics,
        }
    }

    pub fn physics(&self) -> &PlayerPhysicsConfig {
        &self.physics
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.position,
            size: Vec2::new(self.physics.width, self.physics.height),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    /// Move to `position` and drop any vertical motion
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.vel_y = 0.0;
        self.grounded = false;
    }

    /// Region a horizontal move by `dx` passes through, padded by `REGION_PADDING`
    pub fn move_region(&self, dx: f32) -> Aabb {
        self.aabb()
            .swept(Axis::Horizontal, dx)
            .inflated(Self::REGION_PADDING)
    }

    /// Region the next `apply_gravity` call passes through, padded by `REGION_PADDING`
    pub fn fall_region(&self) -> Aabb {
        self.aabb()
            .swept(Axis::Vertical, self.vel_y + self.physics.gravity)
            .inflated(Self::REGION_PADDING)
    }

    /// Translate horizontally by `dx`, stopping flush against the first solid box
    ///
    /// Returns true if a box cut the move short.
    pub fn move_horizontal(&mut self, dx: f32, solids: &[Aabb]) -> bool {
        let sweep = sweep_axis(self.aabb(), Axis::Horizontal, dx, solids);
        self.position.x = sweep.resolved.min.x;
        sweep.blocked
    }

    /// Integrate gravity for one tick and resolve against `solids`
    pub fn apply_gravity(&mut self, solids: &[Aabb]) -> VerticalContact {
        self.vel_y += self.physics.gravity;
        let falling = self.vel_y > 0.0;

        let sweep = sweep_axis(self.aabb(), Axis::Vertical, self.vel_y, solids);
        self.position.y = sweep.resolved.min.y;

        if sweep.blocked {
            self.vel_y = 0.0;
            if falling {
                self.grounded = true;
                VerticalContact::Landed
            } else {
                VerticalContact::HeadBump
            }
        } else {
            if falling {
                self.grounded = false;
            }
            VerticalContact::Free
        }
    }

    /// Start a jump if standing on something
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = self.physics.jump_force;
        self.grounded = false;
        true
    }
}
