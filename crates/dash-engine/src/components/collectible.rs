use glam::Vec2;

use crate::api::types::{CollectibleType, EntityKind};
use crate::components::entity::{Body, Entity};
use crate::components::obstacle::OFFSCREEN_MARGIN;
use crate::components::sprite::SpriteComponent;
use crate::core::pool::Poolable;
use crate::renderer::surface::{RenderSurface, SpriteDraw};

/// Radians per second of the idle bob.
const FLOAT_SPEED: f32 = 4.0;
/// Pixels of vertical bob, each way.
const FLOAT_AMPLITUDE: f32 = 4.0;

/// Pickup scrolling right-to-left.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub body: Body,
    pub collectible_type: CollectibleType,
    pub points: u32,
    pub collected: bool,
    float_phase: f32,
    /// Visual-only offset applied at render time.
    float_offset: f32,
}

impl Collectible {
    pub fn new() -> Self {
        let ty = CollectibleType::default();
        let (w, h) = ty.size();
        Self {
            body: Body::new(Vec2::new(w, h)),
            collectible_type: ty,
            points: ty.points(),
            collected: false,
            float_phase: 0.0,
            float_offset: 0.0,
        }
    }

    pub fn configure(&mut self, collectible_type: CollectibleType, x: f32, y: f32) {
        let (w, h) = collectible_type.size();
        self.collectible_type = collectible_type;
        self.points = collectible_type.points();
        self.body.size = Vec2::new(w, h);
        self.set_spawn_position(x, y);
    }

    /// Mark collected and deactivate. Position is left untouched.
    /// Returns the points awarded, or 0 if it was already collected.
    pub fn collect(&mut self) -> u32 {
        if self.collected || !self.body.active {
            return 0;
        }
        self.collected = true;
        self.body.active = false;
        self.points
    }

    pub fn float_offset(&self) -> f32 {
        self.float_offset
    }
}

impl Default for Collectible {
    fn default() -> Self {
        Self::new()
    }
}

impl Poolable for Collectible {
    fn reset(&mut self) {
        self.body.velocity = Vec2::ZERO;
        self.collected = false;
        self.float_phase = 0.0;
        self.float_offset = 0.0;
    }

    fn is_active(&self) -> bool {
        self.body.active
    }

    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

impl Entity for Collectible {
    fn kind(&self) -> EntityKind {
        EntityKind::Collectible
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, game_speed: f32) {
        if !self.body.active || self.collected {
            return;
        }
        self.body.velocity.x = -game_speed;
        self.body.position.x += self.body.velocity.x;

        self.float_phase = (self.float_phase + dt * FLOAT_SPEED) % std::f32::consts::TAU;
        self.float_offset = self.float_phase.sin() * FLOAT_AMPLITUDE;

        if self.body.right() < -OFFSCREEN_MARGIN {
            self.body.active = false;
        }
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.draw_sprite(SpriteDraw {
            pos: self.body.position + Vec2::new(0.0, self.float_offset),
            size: self.body.size,
            sprite: SpriteComponent::for_kind(EntityKind::Collectible)
                .with_col(self.collectible_type.sprite_col()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instance::RenderBuffer;

    const DT: f32 = 1.0 / 60.0;

    fn spawned() -> Collectible {
        let mut c = Collectible::new();
        c.set_active(true);
        c.configure(CollectibleType::Gem, 400.0, 300.0);
        c
    }

    #[test]
    fn float_offset_is_cosmetic_only() {
        let mut c = spawned();
        for _ in 0..10 {
            c.update(DT, 0.0);
        }
        assert!(c.float_offset().abs() > 0.0);
        let bb = c.bounding_box();
        assert_eq!(bb.y, 300.0, "collision box must ignore the bob");

        let mut buf = RenderBuffer::new();
        c.render(&mut buf);
        assert_eq!(buf.instances[0].y, 300.0 + c.float_offset());
    }

    #[test]
    fn float_offset_stays_within_amplitude() {
        let mut c = spawned();
        for _ in 0..600 {
            c.update(DT, 0.0);
            assert!(c.float_offset().abs() <= FLOAT_AMPLITUDE);
        }
    }

    #[test]
    fn collect_deactivates_without_moving() {
        let mut c = spawned();
        c.update(DT, 5.0);
        let pos = c.body.position;
        assert_eq!(c.collect(), 50);
        assert!(c.collected);
        assert!(!c.is_active());
        assert_eq!(c.body.position, pos);
        assert_eq!(c.collect(), 0, "second collect awards nothing");
    }

    #[test]
    fn deactivates_off_screen() {
        let mut c = spawned();
        c.set_spawn_position(-25.0, 300.0);
        c.update(DT, 10.0);
        assert!(!c.is_active());
        assert!(!c.collected);
    }

    #[test]
    fn reset_clears_collected() {
        let mut c = spawned();
        c.collect();
        c.reset();
        assert!(!c.collected);
        assert_eq!(c.float_offset(), 0.0);
    }
}
