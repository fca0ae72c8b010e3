use bytemuck::{Pod, Zeroable};

use crate::components::layer::RenderLayer;
use crate::core::physics::Aabb;
use crate::renderer::surface::{Color, RenderSurface, SpriteDraw};

/// Per-sprite render data read by the host renderer straight out of
/// linear memory. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Top-left X in world space.
    pub x: f32,
    /// Top-left Y in world space.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub sprite_row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// `RenderLayer` as a float.
    pub layer: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Debug rectangle outline. 8 floats: x, y, w, h, r, g, b, a.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OutlineInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

impl OutlineInstance {
    pub const FLOATS: usize = 8;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub layer: RenderLayer,
}

/// One frame's worth of draw data.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    /// Sprite instances, sorted back-to-front by layer after `finish`.
    pub instances: Vec<RenderInstance>,
    pub outlines: Vec<OutlineInstance>,
    pub texts: Vec<TextItem>,
    /// Simulation frame this buffer was built for.
    pub frame: u64,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            outlines: Vec::new(),
            texts: Vec::new(),
            frame: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.outlines.clear();
        self.texts.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    /// Stable sort by layer so draw order within a layer is submission order.
    pub fn finish(&mut self) {
        self.instances.sort_by(|a, b| a.layer.total_cmp(&b.layer));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for zero-copy host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn outline_count(&self) -> u32 {
        self.outlines.len() as u32
    }

    pub fn outlines_ptr(&self) -> *const f32 {
        self.outlines.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for RenderBuffer {
    fn draw_sprite(&mut self, draw: SpriteDraw) {
        self.instances.push(RenderInstance {
            x: draw.pos.x,
            y: draw.pos.y,
            width: draw.size.x,
            height: draw.size.y,
            sprite_col: draw.sprite.col,
            sprite_row: draw.sprite.row,
            alpha: draw.sprite.alpha,
            layer: draw.sprite.layer.as_u8() as f32,
        });
    }

    fn draw_outline(&mut self, rect: Aabb, color: Color) {
        self.outlines.push(OutlineInstance {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color,
        });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, layer: RenderLayer) {
        self.texts.push(TextItem {
            x,
            y,
            text: text.to_string(),
            layer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::SpriteComponent;
    use glam::Vec2;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 32);
        assert_eq!(std::mem::size_of::<OutlineInstance>(), 32);
    }

    #[test]
    fn finish_sorts_by_layer_stably() {
        let mut buf = RenderBuffer::new();
        let draw = |col: f32, layer: RenderLayer| SpriteDraw {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            sprite: SpriteComponent { col, layer, ..Default::default() },
        };
        buf.draw_sprite(draw(0.0, RenderLayer::Player));
        buf.draw_sprite(draw(1.0, RenderLayer::Background));
        buf.draw_sprite(draw(2.0, RenderLayer::Objects));
        buf.draw_sprite(draw(3.0, RenderLayer::Background));
        buf.finish();

        let cols: Vec<f32> = buf.instances.iter().map(|i| i.sprite_col).collect();
        assert_eq!(cols, vec![1.0, 3.0, 2.0, 0.0]);
    }

    #[test]
    fn instance_floats_view() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance { x: 5.0, ..Default::default() });
        assert_eq!(buf.instance_floats().len(), RenderInstance::FLOATS);
        assert_eq!(buf.instance_floats()[0], 5.0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut buf = RenderBuffer::new();
        buf.draw_outline(Aabb::new(0.0, 0.0, 1.0, 1.0), [1.0; 4]);
        buf.draw_text(0.0, 0.0, "60 FPS", RenderLayer::Overlay);
        buf.clear();
        assert_eq!(buf.outline_count(), 0);
        assert!(buf.texts.is_empty());
    }
}
