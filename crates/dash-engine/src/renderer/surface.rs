//! Drawing contract between entities and whatever presents the frame.

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
use crate::core::physics::Aabb;

/// One sprite draw. Position is the top-left corner of the visual box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: SpriteComponent,
}

/// RGBA color, components in [0, 1].
pub type Color = [f32; 4];

pub const HITBOX_PLAYER: Color = [0.2, 1.0, 0.2, 1.0];
pub const HITBOX_OBSTACLE: Color = [1.0, 0.2, 0.2, 1.0];
pub const HITBOX_COLLECTIBLE: Color = [1.0, 0.9, 0.2, 1.0];

/// Anything entities can draw into.
pub trait RenderSurface {
    fn draw_sprite(&mut self, draw: SpriteDraw);

    /// Rectangle outline, used for hitbox debugging.
    fn draw_outline(&mut self, rect: Aabb, color: Color);

    /// Overlay text (FPS counter, pause banner).
    fn draw_text(&mut self, x: f32, y: f32, text: &str, layer: RenderLayer);
}
