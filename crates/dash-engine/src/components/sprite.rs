use crate::api::types::EntityKind;
use crate::components::layer::RenderLayer;

/// Atlas rows, one per entity kind. Columns select the variant and frame.
pub const PLAYER_ROW: f32 = 0.0;
pub const OBSTACLE_ROW: f32 = 1.0;
pub const COLLECTIBLE_ROW: f32 = 2.0;
pub const EFFECTS_ROW: f32 = 3.0;
/// Sky (col 0) and ground strip (col 1).
pub const SCENERY_ROW: f32 = 4.0;

/// Sprite component: how an entity appears on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub layer: RenderLayer,
}

impl SpriteComponent {
    /// Default sprite for an entity kind.
    pub fn for_kind(kind: EntityKind) -> Self {
        let (row, layer) = match kind {
            EntityKind::Player => (PLAYER_ROW, RenderLayer::Player),
            EntityKind::Obstacle => (OBSTACLE_ROW, RenderLayer::Objects),
            EntityKind::Collectible => (COLLECTIBLE_ROW, RenderLayer::Objects),
        };
        Self {
            col: 0.0,
            row,
            alpha: 1.0,
            layer,
        }
    }

    pub fn with_col(mut self, col: f32) -> Self {
        self.col = col;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            col: 0.0,
            row: 0.0,
            alpha: 1.0,
            layer: RenderLayer::Objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_draws_above_objects() {
        let player = SpriteComponent::for_kind(EntityKind::Player);
        let obstacle = SpriteComponent::for_kind(EntityKind::Obstacle);
        assert!(player.layer > obstacle.layer);
        assert_ne!(player.row, obstacle.row);
    }
}
