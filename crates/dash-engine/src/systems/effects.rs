//! Sparkle particles for pickups.
//!
//! Cosmetic only: particles never take part in collision and are advanced
//! on the fixed tick so replays look identical.

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::components::sprite::{SpriteComponent, EFFECTS_ROW};
use crate::core::rng::Rng;
use crate::renderer::surface::{RenderSurface, SpriteDraw};

const PARTICLE_SIZE: f32 = 4.0;

/// A single sparkle with motion and fade state.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub speed: Vec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub drag: f32,
}

impl Particle {
    pub const DEFAULT_DRAG: f32 = 0.08;

    pub fn new(position: Vec2, speed: Vec2, lifetime: f32) -> Self {
        Particle {
            position,
            speed,
            lifetime,
            max_lifetime: lifetime,
            drag: Self::DEFAULT_DRAG,
        }
    }

    /// Advance particle motion. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.speed *= 1.0 - self.drag;
        self.position += self.speed;
        true
    }

    /// Remaining life as opacity.
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Live particles plus the RNG that seeds new bursts.
#[derive(Debug, Clone)]
pub struct EffectsState {
    pub particles: Vec<Particle>,
    rng: Rng,
    seed: u64,
    max_particles: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 128)
    }

    pub fn with_capacity(seed: u64, max_particles: usize) -> Self {
        EffectsState {
            particles: Vec::with_capacity(max_particles),
            rng: Rng::new(seed.wrapping_add(7919)),
            seed,
            max_particles,
        }
    }

    /// Radial burst. Oldest particles are dropped once the cap is hit.
    pub fn spawn_burst(&mut self, center: Vec2, count: usize, speed_limit: f32, lifetime: f32) {
        for _ in 0..count {
            let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            let speed = self.rng.range_f32(0.3, 1.0) * speed_limit;
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            if self.particles.len() >= self.max_particles {
                self.particles.remove(0);
            }
            self.particles.push(Particle::new(center, velocity, lifetime));
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        for p in &self.particles {
            surface.draw_sprite(SpriteDraw {
                pos: p.position - Vec2::splat(PARTICLE_SIZE / 2.0),
                size: Vec2::splat(PARTICLE_SIZE),
                sprite: SpriteComponent {
                    col: 0.0,
                    row: EFFECTS_ROW,
                    alpha: p.alpha(),
                    layer: RenderLayer::Effects,
                },
            });
        }
    }

    /// Drop all particles and reseed.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.rng = Rng::new(self.seed.wrapping_add(7919));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instance::RenderBuffer;

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::X, 0.1);
        assert!(!p.tick(0.2), "particle should expire");
    }

    #[test]
    fn particle_moves_and_fades() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 1.0);
        assert!(p.tick(0.5));
        assert!(p.position.x > 0.0);
        assert!((p.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn burst_respects_cap() {
        let mut fx = EffectsState::with_capacity(1, 10);
        fx.spawn_burst(Vec2::ZERO, 25, 3.0, 1.0);
        assert_eq!(fx.len(), 10);
    }

    #[test]
    fn tick_removes_expired() {
        let mut fx = EffectsState::new(1);
        fx.spawn_burst(Vec2::new(50.0, 50.0), 8, 3.0, 0.1);
        fx.tick(0.05);
        assert_eq!(fx.len(), 8);
        fx.tick(0.1);
        assert!(fx.is_empty());
    }

    #[test]
    fn renders_on_effects_layer() {
        let mut fx = EffectsState::new(1);
        fx.spawn_burst(Vec2::new(50.0, 50.0), 3, 3.0, 1.0);
        let mut buf = RenderBuffer::new();
        fx.render(&mut buf);
        assert_eq!(buf.instances.len(), 3);
        assert!(buf
            .instances
            .iter()
            .all(|i| i.layer == RenderLayer::Effects.as_u8() as f32));
    }
}
