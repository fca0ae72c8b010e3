pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod render;
pub mod spawner;
