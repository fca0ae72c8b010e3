use glam::Vec2;

use crate::api::types::EntityKind;
use crate::core::physics::Aabb;
use crate::core::pool::Poolable;
use crate::renderer::surface::RenderSurface;

/// Motion state shared by every entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner in world space.
    pub position: Vec2,
    /// Pixels per fixed tick.
    pub velocity: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Whether this entity is checked out (inactive entities are skipped).
    pub active: bool,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size,
            active: false,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_pos_size(self.position, self.size)
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }
}

/// Capability set every entity kind implements.
///
/// Dispatch is static per pool; `kind()` is the discriminant used where
/// heterogeneous entities meet (collision resolution, debug drawing).
pub trait Entity: Poolable {
    fn kind(&self) -> EntityKind;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance one fixed tick. `dt` drives timers; motion is per tick.
    fn update(&mut self, dt: f32, game_speed: f32);

    fn render(&self, surface: &mut dyn RenderSurface);

    /// Collision box. Cosmetic offsets never apply here.
    fn bounding_box(&self) -> Aabb {
        self.body().bounding_box()
    }

    fn set_spawn_position(&mut self, x: f32, y: f32) {
        self.body_mut().position = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_box_matches_position_and_size() {
        let body = Body::new(Vec2::new(20.0, 30.0)).with_pos(Vec2::new(5.0, 7.0));
        let bb = body.bounding_box();
        assert_eq!(bb, Aabb::new(5.0, 7.0, 20.0, 30.0));
        assert_eq!(body.right(), 25.0);
        assert_eq!(body.bottom(), 37.0);
        assert!(!body.active);
    }
}
