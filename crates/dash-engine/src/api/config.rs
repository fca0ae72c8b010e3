use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Engine configuration. Every field has a default, so hosts may pass a
/// partial JSON object and only override what they care about.
///
/// Motion values (`gravity`, `jump_power`, `initial_game_speed`,
/// `move_speed`) are in pixels per fixed tick. Rates are per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// World width in pixels.
    pub width: f32,
    /// World height in pixels.
    pub height: f32,
    /// Simulation rate. The fixed tick is `1 / target_fps` seconds.
    #[serde(rename = "targetFPS")]
    pub target_fps: f32,
    /// Added to the player's vertical velocity every airborne tick (Y points down).
    pub gravity: f32,
    /// Vertical velocity applied on jump. Negative = upward.
    pub jump_power: f32,
    /// Base scroll speed before the difficulty multiplier.
    pub initial_game_speed: f32,
    /// Obstacle spawns per second at difficulty 0.
    pub spawn_rate: f32,
    /// Collectible spawns per second at difficulty 0.
    pub collectible_rate: f32,
    /// Height of the ground strip at the bottom of the world.
    pub ground_height: f32,
    /// Player's fixed spawn column.
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed while a move intent is held.
    pub move_speed: f32,
    /// Catch-up cap: at most this many fixed ticks run per host frame.
    pub max_ticks_per_frame: u32,
    /// Points for clearing an obstacle.
    pub obstacle_pass_points: u32,
    /// Seed for the spawner and effects RNG.
    pub seed: u64,
    pub pools: PoolConfig,
    pub difficulty: DifficultyConfig,
    pub audio: AudioConfig,
    pub render: RenderConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            target_fps: 60.0,
            gravity: 0.6,
            jump_power: -12.0,
            initial_game_speed: 5.0,
            spawn_rate: 0.8,
            collectible_rate: 0.5,
            ground_height: 50.0,
            player_x: 80.0,
            player_width: 32.0,
            player_height: 48.0,
            move_speed: 4.0,
            max_ticks_per_frame: 10,
            obstacle_pass_points: 10,
            seed: 0x5EED,
            pools: PoolConfig::default(),
            difficulty: DifficultyConfig::default(),
            audio: AudioConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed simulation step in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.target_fps
    }

    /// Y coordinate of the visible ground line. Feet rest here.
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(EngineError::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        }

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("targetFPS", self.target_fps)?;
        positive("playerWidth", self.player_width)?;
        positive("playerHeight", self.player_height)?;
        if !(self.ground_height >= 0.0 && self.ground_height + self.player_height <= self.height) {
            return Err(EngineError::InvalidConfig(format!(
                "groundHeight {} leaves no room for the player",
                self.ground_height
            )));
        }
        if !self.gravity.is_finite() || !self.jump_power.is_finite() {
            return Err(EngineError::InvalidConfig("gravity and jumpPower must be finite".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(EngineError::InvalidConfig("maxTicksPerFrame must be at least 1".into()));
        }
        if self.pools.max_obstacles == 0 || self.pools.max_collectibles == 0 {
            return Err(EngineError::InvalidConfig("pool capacities must be at least 1".into()));
        }
        self.difficulty.game_speed_multiplier.validate("gameSpeedMultiplier")?;
        self.difficulty.spawn_rate_multiplier.validate("spawnRateMultiplier")?;
        Ok(())
    }
}

/// Capacities of the entity pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    pub max_obstacles: usize,
    pub max_collectibles: usize,
    /// Objects constructed up front in each pool.
    pub preallocate: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_obstacles: 16,
            max_collectibles: 16,
            preallocate: 4,
        }
    }
}

/// Inclusive `{min, max}` interpolation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Linear interpolation: `min + t * (max - min)`.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig(format!(
                "{name} needs finite min <= max, got {{min: {}, max: {}}}",
                self.min, self.max
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DifficultyConfig {
    /// Seconds until the time contribution saturates.
    pub max_difficulty_time: f32,
    /// Score at which the score contribution saturates.
    pub max_difficulty_score: f32,
    pub time_scale: f32,
    pub score_scale: f32,
    /// Smoothing factor applied per `compute()` call.
    pub smoothing: f32,
    pub game_speed_multiplier: Range,
    pub spawn_rate_multiplier: Range,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            max_difficulty_time: 120.0,
            max_difficulty_score: 1000.0,
            time_scale: 0.6,
            score_scale: 0.4,
            smoothing: 0.1,
            game_speed_multiplier: Range::new(1.0, 2.5),
            spawn_rate_multiplier: Range::new(1.0, 3.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub enabled: bool,
    /// Master volume in [0, 1].
    pub volume: f32,
    pub frequencies: Frequencies,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.3,
            frequencies: Frequencies::default(),
        }
    }
}

/// Base frequencies (Hz) of the synthesized effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frequencies {
    pub jump: f32,
    pub collect: f32,
    pub game_over: f32,
}

impl Default for Frequencies {
    fn default() -> Self {
        Self {
            jump: 440.0,
            collect: 880.0,
            game_over: 220.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Host hint: nearest-neighbour scaling.
    pub pixelated: bool,
    #[serde(rename = "showFPS")]
    pub show_fps: bool,
    pub show_hitboxes: bool,
    pub double_buffering: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixelated: true,
            show_fps: false,
            show_hitboxes: false,
            double_buffering: true,
        }
    }
}
