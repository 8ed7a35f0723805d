pub mod entity;
pub mod world;

pub use tilecraft_simulation as simulation;
