use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::EntityKind;
use crate::components::animation::FrameCycle;
use crate::components::entity::{Body, Entity};
use crate::components::sprite::SpriteComponent;
use crate::core::physics::{clamp_to_ground, integrate};
use crate::core::pool::Poolable;
use crate::renderer::surface::{RenderSurface, SpriteDraw};

/// Atlas column shown while airborne. Run frames are columns 0 and 1.
const JUMP_FRAME_COL: f32 = 2.0;
const RUN_FPS: f32 = 10.0;

/// The runner.
///
/// `position` is the sprite's top-left corner, but the ground contact is the
/// sprite's bottom edge: `ground_y` is the top-left Y at which the feet sit
/// exactly on `ground_line`.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Vertical velocity applied on jump (negative = up).
    pub jump_power: f32,
    pub gravity: f32,
    pub move_speed: f32,
    /// Visible ground line (world Y of the feet when standing).
    pub ground_line: f32,
    /// Resting top-left Y: `ground_line - height`.
    pub ground_y: f32,
    pub is_jumping: bool,
    spawn_x: f32,
    world_width: f32,
    run_cycle: FrameCycle,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let size = Vec2::new(config.player_width, config.player_height);
        let ground_line = config.ground_line();
        let ground_y = ground_line - size.y;
        let mut body = Body::new(size).with_pos(Vec2::new(config.player_x, ground_y));
        body.active = true;
        Self {
            body,
            jump_power: config.jump_power,
            gravity: config.gravity,
            move_speed: config.move_speed,
            ground_line,
            ground_y,
            is_jumping: false,
            spawn_x: config.player_x,
            world_width: config.width,
            run_cycle: FrameCycle::new(2, RUN_FPS),
        }
    }

    /// No double jumps: only a grounded, non-jumping player may jump.
    pub fn can_jump(&self) -> bool {
        self.body.active && self.is_grounded()
    }

    /// Returns true if the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.body.velocity.y = self.jump_power;
        self.is_jumping = true;
        self.run_cycle.hold(0);
        true
    }

    pub fn move_left(&mut self) {
        self.body.velocity.x = -self.move_speed;
    }

    pub fn move_right(&mut self) {
        self.body.velocity.x = self.move_speed;
    }

    /// Stop horizontal motion. Called when move intent ends.
    pub fn stop(&mut self) {
        self.body.velocity.x = 0.0;
    }

    /// World Y of the sprite's bottom edge.
    pub fn feet_y(&self) -> f32 {
        self.body.bottom()
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping && self.body.position.y >= self.ground_y
    }

    pub fn animation_frame(&self) -> u32 {
        self.run_cycle.frame
    }

    fn sprite(&self) -> SpriteComponent {
        let col = if self.is_jumping {
            JUMP_FRAME_COL
        } else {
            self.run_cycle.frame as f32
        };
        SpriteComponent::for_kind(EntityKind::Player).with_col(col)
    }
}

impl Poolable for Player {
    fn reset(&mut self) {
        self.body.position = Vec2::new(self.spawn_x, self.ground_y);
        self.body.velocity = Vec2::ZERO;
        self.is_jumping = false;
        self.run_cycle.reset();
    }

    fn is_active(&self) -> bool {
        self.body.active
    }

    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, _game_speed: f32) {
        if !self.body.active {
            return;
        }

        let max_x = (self.world_width - self.body.size.x).max(0.0);
        let airborne = self.is_jumping || self.body.position.y < self.ground_y;

        if airborne {
            integrate(&mut self.body.position, &mut self.body.velocity, self.gravity);
        } else {
            self.body.position.x += self.body.velocity.x;
        }
        self.body.position.x = self.body.position.x.clamp(0.0, max_x);

        if clamp_to_ground(&mut self.body.position, &mut self.body.velocity, self.ground_y) {
            self.body.velocity.y = 0.0;
            if self.is_jumping {
                self.is_jumping = false;
                self.run_cycle.play();
            }
        }

        if !self.is_jumping {
            self.run_cycle.tick(dt);
        }
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.draw_sprite(SpriteDraw {
            pos: self.body.position,
            size: self.body.size,
            sprite: self.sprite(),
        });
    }

    fn set_spawn_position(&mut self, x: f32, y: f32) {
        self.spawn_x = x;
        self.body.position = Vec2::new(x, y.min(self.ground_y));
    }
}
