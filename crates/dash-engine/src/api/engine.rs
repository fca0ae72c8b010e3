//! The orchestrator: owns the fixed-timestep loop, entity pools, state
//! machine and event bus.
//!
//! ```text
//! idle ──start──▶ running ◀──resume── paused
//!                  │   └────pause────▶ │
//!        obstacle hit / stop          stop
//!                  ▼                   │
//!               gameover ◀─────────────┘
//! any state ──reset──▶ idle
//! ```

use crate::api::config::GameConfig;
use crate::api::events::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::api::types::{GameState, SoundEffect};
use crate::audio::system::{AudioBackend, AudioSystem};
use crate::components::collectible::Collectible;
use crate::components::entity::Entity;
use crate::components::obstacle::Obstacle;
use crate::components::player::Player;
use crate::core::pool::{ObjectPool, Poolable};
use crate::core::time::{FixedTimestep, FrameClock};
use crate::error::{EngineError, Result};
use crate::input::event::InputEvent;
use crate::input::handler::{InputAction, InputHandler};
use crate::renderer::instance::RenderBuffer;
use crate::storage::{HighScoreKeeper, HighScoreStore};
use crate::systems::collision::{self, CollisionOutcome};
use crate::systems::difficulty::DifficultySystem;
use crate::systems::effects::EffectsState;
use crate::systems::render::{FrameView, RenderSystem};
use crate::systems::spawner::{SpawnRequest, Spawner};

const SPARKLE_COUNT: usize = 8;
const SPARKLE_SPEED: f32 = 3.0;
const SPARKLE_LIFETIME: f32 = 0.4;

type ScoreCallback = Box<dyn FnMut(u32)>;

pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    initialized: bool,
    destroyed: bool,
    timestep: FixedTimestep,
    clock: FrameClock,
    player: Player,
    obstacles: ObjectPool<Obstacle>,
    collectibles: ObjectPool<Collectible>,
    spawner: Spawner,
    difficulty: DifficultySystem,
    effects: EffectsState,
    renderer: RenderSystem,
    audio: AudioSystem,
    input: InputHandler,
    high_scores: HighScoreKeeper,
    events: EventBus,
    score: u32,
    base_speed: f32,
    elapsed: f32,
    ticks: u64,
    score_callback: Option<ScoreCallback>,
}

impl GameEngine {
    /// Build an engine. Storage and audio are optional collaborators; without
    /// them the high score lives for the session only and the game is silent.
    pub fn new(
        config: GameConfig,
        store: Option<Box<dyn HighScoreStore>>,
        audio: Option<Box<dyn AudioBackend>>,
    ) -> Result<Self> {
        config.validate()?;
        let pools = &config.pools;
        let engine = Self {
            timestep: FixedTimestep::with_max_steps(config.fixed_dt(), config.max_ticks_per_frame),
            clock: FrameClock::new(),
            player: Player::new(&config),
            obstacles: ObjectPool::with_preallocated(
                pools.max_obstacles,
                pools.preallocate,
                Obstacle::new,
            ),
            collectibles: ObjectPool::with_preallocated(
                pools.max_collectibles,
                pools.preallocate,
                Collectible::new,
            ),
            spawner: Spawner::new(&config),
            difficulty: DifficultySystem::new(config.difficulty.clone()),
            effects: EffectsState::new(config.seed),
            renderer: RenderSystem::new(&config),
            audio: AudioSystem::new(config.audio.clone(), audio),
            input: InputHandler::new(config.width),
            high_scores: HighScoreKeeper::new(store),
            events: EventBus::new(),
            state: GameState::Idle,
            initialized: false,
            destroyed: false,
            score: 0,
            base_speed: config.initial_game_speed,
            elapsed: 0.0,
            ticks: 0,
            score_callback: None,
            config,
        };
        Ok(engine)
    }

    /// Attach input and read the persisted high score. Idempotent.
    pub fn initialize(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }
        if self.initialized {
            return Ok(());
        }
        self.input.initialize();
        let high = self.high_scores.load();
        self.initialized = true;
        log::info!(
            "engine initialized: {}x{} @ {} Hz, high score {}",
            self.config.width,
            self.config.height,
            self.config.target_fps,
            high
        );
        Ok(())
    }

    /// idle/gameover → running. A no-op while already running or paused.
    pub fn start(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }
        self.initialize()?;
        match self.state {
            GameState::Running | GameState::Paused => {
                log::warn!("start() ignored: game already {}", self.state.as_str());
                return Ok(());
            }
            GameState::Idle | GameState::GameOver => {}
        }
        self.reset_session();
        self.clock.rebase();
        self.timestep.reset();
        self.state = GameState::Running;
        log::info!("game started");
        self.events.publish(GameEvent::GameStart);
        Ok(())
    }

    /// running → paused. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        self.state = GameState::Paused;
        log::info!("game paused");
        self.events.publish(GameEvent::Pause);
        true
    }

    /// paused → running. Wall time spent paused is not simulated.
    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.clock.rebase();
        self.timestep.reset();
        self.state = GameState::Running;
        log::info!("game resumed");
        self.events.publish(GameEvent::Resume);
        true
    }

    /// End the session early: running/paused → gameover.
    pub fn stop(&mut self) -> bool {
        match self.state {
            GameState::Running | GameState::Paused => {
                self.game_over();
                true
            }
            GameState::Idle | GameState::GameOver => false,
        }
    }

    /// Any state → idle. Pools are emptied and the difficulty override cleared.
    pub fn reset(&mut self) {
        self.reset_session();
        self.difficulty.set_override(None);
        self.input.reset();
        self.state = GameState::Idle;
        log::info!("game reset");
    }

    /// Tear down. No further ticks run and every listener is dropped.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.state = GameState::Idle;
        self.input.destroy();
        self.events.clear();
        self.audio.clear_listeners();
        self.score_callback = None;
        log::info!("engine destroyed");
    }

    /// Host frame callback. Runs the fixed ticks owed since the previous
    /// frame (capped), then renders once. Returns the number of ticks run.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if self.destroyed {
            return 0;
        }
        let frame_dt = self.clock.delta(now_ms);
        let mut ran = 0;
        if self.state == GameState::Running {
            let steps = self.timestep.accumulate(frame_dt);
            for _ in 0..steps {
                self.step();
                ran += 1;
                if self.state != GameState::Running {
                    break;
                }
            }
        }
        self.render(frame_dt);
        ran
    }

    /// Run exactly one fixed tick if the game is running.
    pub fn tick(&mut self) -> bool {
        if self.destroyed || self.state != GameState::Running {
            return false;
        }
        self.step();
        true
    }

    /// Feed one host input event. Pause toggles and jumps apply immediately.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.input.handle_event(event) {
            return false;
        }
        if self.input.take_gesture() {
            self.audio.unlock();
        }
        for action in self.input.drain_actions() {
            match action {
                InputAction::Jump => {
                    self.jump();
                }
                InputAction::Pause => {
                    if !self.pause() {
                        self.resume();
                    }
                }
            }
        }
        true
    }

    /// Make the player jump. Only while running; no double jumps.
    pub fn jump(&mut self) -> bool {
        if self.state != GameState::Running || !self.player.jump() {
            return false;
        }
        self.audio.play(SoundEffect::Jump);
        true
    }

    pub fn get_score(&self) -> u32 {
        self.score
    }

    /// Overwrite the score. Negative values clamp to 0. Always notifies.
    pub fn set_score(&mut self, score: i64) {
        let clamped = score.clamp(0, i64::from(u32::MAX)) as u32;
        if i64::from(clamped) != score {
            log::warn!("set_score({}) clamped to {}", score, clamped);
        }
        self.score = clamped;
        self.notify_score();
    }

    pub fn get_high_score(&self) -> u32 {
        self.high_scores.high_score()
    }

    pub fn reset_high_score(&mut self) {
        self.high_scores.reset();
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    /// Set the base scroll speed (before the difficulty multiplier).
    /// Negative or non-finite values are ignored.
    pub fn set_game_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.base_speed = speed;
        } else {
            log::warn!("set_game_speed({}) ignored", speed);
        }
    }

    /// Effective scroll speed in pixels per tick.
    pub fn game_speed(&self) -> f32 {
        self.base_speed * self.difficulty.game_speed_multiplier()
    }

    pub fn set_score_change_callback(&mut self, callback: impl FnMut(u32) + 'static) {
        self.score_callback = Some(Box::new(callback));
    }

    pub fn clear_score_change_callback(&mut self) {
        self.score_callback = None;
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Pin difficulty to `value`, clamped to [0, 1]. `None` or NaN clears
    /// the override and smoothing resumes from its last state.
    pub fn set_difficulty_override(&mut self, value: Option<f32>) {
        self.difficulty.set_override(value);
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty.current()
    }

    pub fn set_viewport(&mut self, width: f32) {
        self.input.set_viewport(width);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObjectPool<Obstacle> {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &ObjectPool<Collectible> {
        &self.collectibles
    }

    /// The last presented frame.
    pub fn render_buffer(&self) -> &RenderBuffer {
        self.renderer.front()
    }

    pub fn renderer(&self) -> &RenderSystem {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut RenderSystem {
        &mut self.renderer
    }

    pub fn audio(&self) -> &AudioSystem {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioSystem {
        &mut self.audio
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Simulated seconds in the current session.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn step(&mut self) {
        let dt = self.timestep.dt();

        let intent = self.input.state();
        match (intent.left, intent.right) {
            (true, false) => self.player.move_left(),
            (false, true) => self.player.move_right(),
            _ => self.player.stop(),
        }

        self.elapsed += dt;
        self.difficulty.compute(self.elapsed, self.score as f32);
        let speed = self.game_speed();

        for request in self.spawner.update(dt, self.difficulty.spawn_rate_multiplier()) {
            self.spawn(request);
        }

        self.player.update(dt, speed);
        for (_, obstacle) in self.obstacles.iter_active_mut() {
            obstacle.update(dt, speed);
        }
        for (_, collectible) in self.collectibles.iter_active_mut() {
            collectible.update(dt, speed);
        }
        self.effects.tick(dt);

        let player_left = self.player.body.position.x;
        let mut gained = 0u32;
        for (_, obstacle) in self.obstacles.iter_active_mut() {
            if !obstacle.passed && obstacle.body.right() < player_left {
                obstacle.passed = true;
                gained = gained.saturating_add(self.config.obstacle_pass_points);
            }
        }

        match collision::detect(
            &self.player.bounding_box(),
            &self.obstacles,
            &self.collectibles,
        ) {
            CollisionOutcome::Clear => {}
            CollisionOutcome::ObstacleHit(_) => {
                self.ticks += 1;
                self.add_score(gained);
                self.game_over();
                return;
            }
            CollisionOutcome::Collected(handles) => {
                for handle in handles {
                    let Some(collectible) = self.collectibles.get_mut(handle) else {
                        continue;
                    };
                    let center = collectible.body.position + collectible.body.size / 2.0;
                    let points = collectible.collect();
                    if points == 0 {
                        continue;
                    }
                    gained = gained.saturating_add(points);
                    self.effects
                        .spawn_burst(center, SPARKLE_COUNT, SPARKLE_SPEED, SPARKLE_LIFETIME);
                    self.audio.play(SoundEffect::Collect);
                    self.events.publish(GameEvent::Collect { points });
                }
            }
        }

        self.add_score(gained);
        self.ticks += 1;
    }

    fn spawn(&mut self, request: SpawnRequest) {
        let ground_line = self.config.ground_line();
        match request {
            SpawnRequest::Obstacle { obstacle_type, x } => match self.obstacles.acquire() {
                Ok((_, obstacle)) => {
                    obstacle.configure(obstacle_type, x, ground_line);
                    log::debug!("spawned {:?} at x={}", obstacle_type, x);
                }
                Err(err) => log::warn!("obstacle spawn skipped: {}", err),
            },
            SpawnRequest::Collectible {
                collectible_type,
                x,
                y,
            } => match self.collectibles.acquire() {
                Ok((_, collectible)) => {
                    collectible.configure(collectible_type, x, y);
                    log::debug!("spawned {:?} at ({}, {})", collectible_type, x, y);
                }
                Err(err) => log::warn!("collectible spawn skipped: {}", err),
            },
        }
    }

    fn render(&mut self, frame_dt: f32) {
        let view = FrameView {
            player: &self.player,
            obstacles: &self.obstacles,
            collectibles: &self.collectibles,
            effects: &self.effects,
            state: self.state,
        };
        self.renderer.render(&view, frame_dt);
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        let final_score = self.score;
        if self.high_scores.record(final_score) {
            log::info!("game over: {} (new high score)", final_score);
        } else {
            log::info!("game over: {}", final_score);
        }
        self.audio.play(SoundEffect::GameOver);
        self.events.publish(GameEvent::GameOver { final_score });
    }

    fn reset_session(&mut self) {
        self.obstacles.release_all();
        self.collectibles.release_all();
        self.player.reset();
        self.player.set_active(true);
        self.spawner.reset();
        self.difficulty.reset_state();
        self.effects.clear();
        self.elapsed = 0.0;
        self.ticks = 0;
        self.base_speed = self.config.initial_game_speed;
        if self.score != 0 {
            self.score = 0;
            self.notify_score();
        }
    }

    fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.notify_score();
    }

    fn notify_score(&mut self) {
        let score = self.score;
        if let Some(callback) = self.score_callback.as_mut() {
            callback(score);
        }
        self.events.publish(GameEvent::Score { score });
    }
}
