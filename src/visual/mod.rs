pub mod cards;
pub mod interactions;
pub mod overlay;
pub mod physics;
pub mod plugin;
pub mod utils;
