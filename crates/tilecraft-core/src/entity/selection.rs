//! Hotbar selection of the tile kind to place

use tilecraft_simulation::TileKind;

/// Currently selected tile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSelector {
    selected: TileKind,
}

impl TileSelector {
    pub fn new() -> Self {
        Self {
            selected: TileKind::Dirt,
        }
    }

    pub fn selected(&self) -> TileKind {
        self.selected
    }

    /// Step through kinds by `delta` wheel steps, wrapping both ways
    pub fn scroll(&mut self, delta: i32) {
        self.selected = self.selected.cycled(delta);
    }

    /// Select by number key: 1 is the first kind. Other keys are ignored.
    pub fn select_hotkey(&mut self, key: u8) -> bool {
        let Some(index) = (key as usize).checked_sub(1) else {
            return false;
        };
        match TileKind::from_index(index) {
            Some(kind) => {
                self.selected = kind;
                true
            }
            None => false,
        }
    }

    /// Hotbar text, e.g. "Selected Block: Dirt"
    pub fn label(&self) -> String {
        format!("Selected Block: {}", self.selected.name())
    }
}

impl Default for TileSelector {
    fn default() -> Self {
        Self::new()
    }
}
