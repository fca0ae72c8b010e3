use serde::{Deserialize, Serialize};

/// Discriminant for the three entity kinds the engine simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Collectible,
}

/// Lifecycle state of a session. Exactly one instance, owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl GameState {
    pub fn as_str(self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::GameOver => "gameover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleType {
    /// Short, wide block.
    #[default]
    Crate,
    /// Tall, narrow pillar.
    Pillar,
}

impl ObstacleType {
    /// (width, height) in pixels.
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleType::Crate => (36.0, 32.0),
            ObstacleType::Pillar => (24.0, 56.0),
        }
    }

    /// Sprite column in the atlas.
    pub fn sprite_col(self) -> f32 {
        match self {
            ObstacleType::Crate => 0.0,
            ObstacleType::Pillar => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectibleType {
    #[default]
    Coin,
    Gem,
}

impl CollectibleType {
    pub fn points(self) -> u32 {
        match self {
            CollectibleType::Coin => 10,
            CollectibleType::Gem => 50,
        }
    }

    pub fn size(self) -> (f32, f32) {
        match self {
            CollectibleType::Coin => (16.0, 16.0),
            CollectibleType::Gem => (20.0, 20.0),
        }
    }

    pub fn sprite_col(self) -> f32 {
        match self {
            CollectibleType::Coin => 0.0,
            CollectibleType::Gem => 1.0,
        }
    }
}

/// Short synthesized effects the engine triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jump,
    Collect,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(GameState::default(), GameState::Idle);
        assert_eq!(GameState::GameOver.as_str(), "gameover");
    }

    #[test]
    fn gems_are_worth_more_than_coins() {
        assert!(CollectibleType::Gem.points() > CollectibleType::Coin.points());
    }
}
