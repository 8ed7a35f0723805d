//! Per-tick presentation data

use tilecraft_simulation::TileKind;

use super::collision::Aabb;

/// Everything a renderer needs to draw one frame
///
/// Boxes are in world units; subtract `camera_x` from x to get screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Tiles inside the camera's horizontal window, sorted column by column
    pub visible_tiles: Vec<(Aabb, TileKind)>,
    pub player_box: Aabb,
    pub selected: TileKind,
    pub selected_label: String,
    pub camera_x: f32,
}

impl FrameSnapshot {
    /// Kind of the visible tile whose box contains the world point, if any
    pub fn tile_at(&self, x: f32, y: f32) -> Option<TileKind> {
        let point = glam::Vec2::new(x, y);
        self.visible_tiles
            .iter()
            .find(|(tile, _)| tile.contains_point(point))
            .map(|(_, kind)| *kind)
    }
}
