use glam::Vec2;

use crate::api::config::{GameConfig, RenderConfig};
use crate::api::types::{EntityKind, GameState};
use crate::components::collectible::Collectible;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::obstacle::Obstacle;
use crate::components::player::Player;
use crate::components::sprite::{SpriteComponent, SCENERY_ROW};
use crate::core::pool::ObjectPool;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::surface::{
    RenderSurface, SpriteDraw, HITBOX_COLLECTIBLE, HITBOX_OBSTACLE, HITBOX_PLAYER,
};
use crate::systems::effects::EffectsState;

/// Frames-per-second over a rolling one-second window.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one presented frame that took `dt` seconds.
    pub fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt.max(0.0);
        if self.elapsed >= 1.0 {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Read-only view of everything drawn in a frame.
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub obstacles: &'a ObjectPool<Obstacle>,
    pub collectibles: &'a ObjectPool<Collectible>,
    pub effects: &'a EffectsState,
    pub state: GameState,
}

/// Builds draw lists, optionally double buffered: the host always reads a
/// complete `front` while the next frame is assembled in `back`.
pub struct RenderSystem {
    config: RenderConfig,
    front: RenderBuffer,
    back: RenderBuffer,
    fps: FpsCounter,
    world: Vec2,
    ground_line: f32,
    frame: u64,
}

impl RenderSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.render.clone(),
            front: RenderBuffer::new(),
            back: RenderBuffer::new(),
            fps: FpsCounter::new(),
            world: Vec2::new(config.width, config.height),
            ground_line: config.ground_line(),
            frame: 0,
        }
    }

    /// Draw one frame and present it. Returns the buffer the host should read.
    pub fn render(&mut self, view: &FrameView<'_>, frame_dt: f32) -> &RenderBuffer {
        self.fps.record(frame_dt);
        self.frame += 1;

        let overlay = Overlay {
            fps: self.config.show_fps.then(|| self.fps.fps()),
            hitboxes: self.config.show_hitboxes,
            world: self.world,
            ground_line: self.ground_line,
        };

        let target = if self.config.double_buffering {
            &mut self.back
        } else {
            &mut self.front
        };
        target.clear();
        target.frame = self.frame;
        draw_frame(target, view, &overlay);
        target.finish();

        if self.config.double_buffering {
            std::mem::swap(&mut self.front, &mut self.back);
        }
        &self.front
    }

    /// The last presented frame.
    pub fn front(&self) -> &RenderBuffer {
        &self.front
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_show_hitboxes(&mut self, show: bool) {
        self.config.show_hitboxes = show;
    }

    pub fn set_show_fps(&mut self, show: bool) {
        self.config.show_fps = show;
    }
}

struct Overlay {
    fps: Option<f32>,
    hitboxes: bool,
    world: Vec2,
    ground_line: f32,
}

fn scenery(col: f32, layer: RenderLayer) -> SpriteComponent {
    SpriteComponent {
        col,
        row: SCENERY_ROW,
        alpha: 1.0,
        layer,
    }
}

fn hitbox_color(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::Player => HITBOX_PLAYER,
        EntityKind::Obstacle => HITBOX_OBSTACLE,
        EntityKind::Collectible => HITBOX_COLLECTIBLE,
    }
}

fn draw_frame(surface: &mut dyn RenderSurface, view: &FrameView<'_>, overlay: &Overlay) {
    surface.draw_sprite(SpriteDraw {
        pos: Vec2::ZERO,
        size: overlay.world,
        sprite: scenery(0.0, RenderLayer::Background),
    });
    surface.draw_sprite(SpriteDraw {
        pos: Vec2::new(0.0, overlay.ground_line),
        size: Vec2::new(overlay.world.x, overlay.world.y - overlay.ground_line),
        sprite: scenery(1.0, RenderLayer::Ground),
    });

    let mut entities: Vec<&dyn Entity> = Vec::new();
    entities.extend(view.obstacles.iter_active().map(|(_, o)| o as &dyn Entity));
    entities.extend(view.collectibles.iter_active().map(|(_, c)| c as &dyn Entity));
    if view.player.body.active {
        entities.push(view.player);
    }

    for entity in &entities {
        entity.render(surface);
    }
    view.effects.render(surface);

    if overlay.hitboxes {
        for entity in &entities {
            surface.draw_outline(entity.bounding_box(), hitbox_color(entity.kind()));
        }
    }

    if let Some(fps) = overlay.fps {
        surface.draw_text(8.0, 16.0, &format!("{:.0} FPS", fps), RenderLayer::Overlay);
    }

    if view.state == GameState::Paused {
        surface.draw_text(
            overlay.world.x / 2.0,
            overlay.world.y / 2.0,
            "PAUSED",
            RenderLayer::Overlay,
        );
    }
}
