//! Player input state

use glam::Vec2;

/// Input sampled for one tick, already decoupled from any window system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    // Movement keys
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,

    // Number key pressed this tick (1-7 select a tile kind)
    pub hotkey: Option<u8>,

    // Accumulated wheel steps this tick, positive away from the user
    pub scroll_delta: i32,

    // Mouse state
    pub pointer_screen_pos: Option<Vec2>, // Screen coords, origin top-left
    pub left_mouse_pressed: bool,         // Place
    pub right_mouse_pressed: bool,        // Remove
}

/// What the player asked for this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickIntents {
    /// -1 left, 0 idle, +1 right
    pub direction: i8,
    pub jump: bool,
    pub hotkey: Option<u8>,
    pub scroll: i32,
    /// Screen position to place the selected tile at
    pub place_at: Option<Vec2>,
    /// Screen position to remove a tile at
    pub remove_at: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate raw input into intents
    ///
    /// Holding both direction keys cancels out. Mouse actions need a pointer
    /// position; without one they are dropped.
    pub fn intents(&self) -> TickIntents {
        let direction = match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };

        TickIntents {
            direction,
            jump: self.jump_pressed,
            hotkey: self.hotkey,
            scroll: self.scroll_delta,
            place_at: self.pointer_screen_pos.filter(|_| self.left_mouse_pressed),
            remove_at: self.pointer_screen_pos.filter(|_| self.right_mouse_pressed),
        }
    }
}
