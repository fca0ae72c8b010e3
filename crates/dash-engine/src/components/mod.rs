pub mod animation;
pub mod collectible;
pub mod entity;
pub mod layer;
pub mod obstacle;
pub mod player;
pub mod sprite;
