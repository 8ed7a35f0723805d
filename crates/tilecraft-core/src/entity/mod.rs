pub mod input;
pub mod player;
pub mod selection;

pub use input::{InputState, TickIntents};
pub use player::{PlayerBody, PlayerPhysicsConfig, VerticalContact};
pub use selection::TileSelector;
