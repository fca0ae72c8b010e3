use glam::Vec2;

use crate::api::types::{EntityKind, ObstacleType};
use crate::components::animation::FrameCycle;
use crate::components::entity::{Body, Entity};
use crate::components::sprite::SpriteComponent;
use crate::core::pool::Poolable;
use crate::renderer::surface::{RenderSurface, SpriteDraw};

/// An obstacle stays live until its right edge is this far past the left
/// boundary, so its slot is not reused while it is still partly visible.
pub const OFFSCREEN_MARGIN: f32 = 10.0;
const ANIMATION_FPS: f32 = 4.0;

/// Ground hazard scrolling right-to-left. Touching one ends the run.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub body: Body,
    pub obstacle_type: ObstacleType,
    /// Set once the player has cleared this obstacle (scored).
    pub passed: bool,
    animation: FrameCycle,
}

impl Obstacle {
    pub fn new() -> Self {
        let (w, h) = ObstacleType::default().size();
        Self {
            body: Body::new(Vec2::new(w, h)),
            obstacle_type: ObstacleType::default(),
            passed: false,
            animation: FrameCycle::new(2, ANIMATION_FPS),
        }
    }

    /// Set the type and place the obstacle with its base on `ground_line`.
    pub fn configure(&mut self, obstacle_type: ObstacleType, x: f32, ground_line: f32) {
        let (w, h) = obstacle_type.size();
        self.obstacle_type = obstacle_type;
        self.body.size = Vec2::new(w, h);
        self.set_spawn_position(x, ground_line - h);
    }

    pub fn animation_frame(&self) -> u32 {
        self.animation.frame
    }

    /// Fully off the left edge, including the margin.
    pub fn is_offscreen(&self) -> bool {
        self.body.right() < -OFFSCREEN_MARGIN
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::new()
    }
}

impl Poolable for Obstacle {
    fn reset(&mut self) {
        self.body.velocity = Vec2::ZERO;
        self.passed = false;
        self.animation.reset();
    }

    fn is_active(&self) -> bool {
        self.body.active
    }

    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, game_speed: f32) {
        if !self.body.active {
            return;
        }
        self.body.velocity.x = -game_speed;
        self.body.position.x += self.body.velocity.x;
        self.animation.tick(dt);

        if self.is_offscreen() {
            self.body.active = false;
        }
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        let col = self.obstacle_type.sprite_col() + self.animation.frame as f32;
        surface.draw_sprite(SpriteDraw {
            pos: self.body.position,
            size: self.body.size,
            sprite: SpriteComponent::for_kind(EntityKind::Obstacle).with_col(col),
        });
    }
}
