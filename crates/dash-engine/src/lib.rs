pub mod api;
pub mod audio;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod storage;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    AudioConfig, DifficultyConfig, Frequencies, GameConfig, PoolConfig, Range, RenderConfig,
};
pub use api::engine::GameEngine;
pub use api::events::{EventBus, EventKind, GameEvent, SubscriptionId};
pub use api::types::{CollectibleType, EntityKind, GameState, ObstacleType, SoundEffect};
pub use audio::{AudioBackend, AudioSystem, Tone, Waveform};
pub use components::collectible::Collectible;
pub use components::entity::{Body, Entity};
pub use components::layer::RenderLayer;
pub use components::obstacle::Obstacle;
pub use components::player::Player;
pub use components::sprite::SpriteComponent;
pub use crate::core::physics::{collides, Aabb};
pub use crate::core::pool::{ObjectPool, PoolHandle, Poolable};
pub use crate::core::time::{FixedTimestep, FrameClock};
pub use error::{AudioError, EngineError, Result, StorageError};
pub use input::{InputAction, InputEvent, InputHandler, InputState, Key};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use renderer::surface::RenderSurface;
pub use storage::{HighScoreKeeper, HighScoreStore, MemoryStore, HIGH_SCORE_KEY};
pub use systems::difficulty::DifficultySystem;
