//! Timed obstacle and collectible spawning.
//!
//! Deterministic for a given seed: timers advance by the fixed tick and
//! every random choice comes from the seeded RNG.

use crate::api::config::GameConfig;
use crate::api::types::{CollectibleType, ObstacleType};
use crate::core::rng::Rng;

/// Height above the ground line of a floating collectible's bottom edge.
const AIR_LIFT: f32 = 80.0;
/// Height above the ground line of a ground collectible's bottom edge.
const GROUND_LIFT: f32 = 4.0;
const GEM_CHANCE: f32 = 0.2;
/// Seconds a collectible is held back after an obstacle spawns.
const COLLECTIBLE_STAGGER: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Obstacle { obstacle_type: ObstacleType, x: f32 },
    Collectible { collectible_type: CollectibleType, x: f32, y: f32 },
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Rng,
    seed: u64,
    spawn_rate: f32,
    collectible_rate: f32,
    spawn_x: f32,
    ground_line: f32,
    obstacle_timer: f32,
    collectible_timer: f32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        let mut spawner = Self {
            rng: Rng::new(config.seed),
            seed: config.seed,
            spawn_rate: config.spawn_rate,
            collectible_rate: config.collectible_rate,
            spawn_x: config.width,
            ground_line: config.ground_line(),
            obstacle_timer: 0.0,
            collectible_timer: 0.0,
        };
        spawner.reset();
        spawner
    }

    /// Reseed and rearm both timers. Same seed, same session.
    pub fn reset(&mut self) {
        self.rng = Rng::new(self.seed);
        self.obstacle_timer = interval(self.spawn_rate, 1.0);
        self.collectible_timer = interval(self.collectible_rate, 1.0);
    }

    /// Advance timers by one tick. At most one spawn of each kind per call.
    pub fn update(&mut self, dt: f32, spawn_multiplier: f32) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();

        self.obstacle_timer -= dt;
        if self.obstacle_timer <= 0.0 {
            let obstacle_type = if self.rng.chance(0.5) {
                ObstacleType::Crate
            } else {
                ObstacleType::Pillar
            };
            requests.push(SpawnRequest::Obstacle {
                obstacle_type,
                x: self.spawn_x,
            });
            let jitter = self.rng.range_f32(0.75, 1.25);
            self.obstacle_timer += interval(self.spawn_rate, spawn_multiplier) * jitter;
            self.collectible_timer = self.collectible_timer.max(COLLECTIBLE_STAGGER);
        }

        self.collectible_timer -= dt;
        if self.collectible_timer <= 0.0 {
            let collectible_type = if self.rng.chance(GEM_CHANCE) {
                CollectibleType::Gem
            } else {
                CollectibleType::Coin
            };
            let (_, h) = collectible_type.size();
            let lift = if self.rng.chance(0.5) { AIR_LIFT } else { GROUND_LIFT };
            requests.push(SpawnRequest::Collectible {
                collectible_type,
                x: self.spawn_x,
                y: self.ground_line - h - lift,
            });
            let jitter = self.rng.range_f32(0.75, 1.25);
            self.collectible_timer += interval(self.collectible_rate, spawn_multiplier) * jitter;
        }

        requests
    }
}

/// Seconds between spawns. A non-positive rate never spawns.
fn interval(rate: f32, multiplier: f32) -> f32 {
    let effective = rate * multiplier.max(0.0);
    if effective > 0.0 && effective.is_finite() {
        1.0 / effective
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(spawner: &mut Spawner, ticks: usize, mult: f32) -> Vec<SpawnRequest> {
        (0..ticks).flat_map(|_| spawner.update(DT, mult)).collect()
    }

    fn count_obstacles(reqs: &[SpawnRequest]) -> usize {
        reqs.iter()
            .filter(|r| matches!(r, SpawnRequest::Obstacle { .. }))
            .count()
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = GameConfig::default();
        let mut a = Spawner::new(&config);
        let mut b = Spawner::new(&config);
        assert_eq!(run(&mut a, 600, 1.0), run(&mut b, 600, 1.0));
    }

    #[test]
    fn reset_replays_the_session() {
        let mut s = Spawner::new(&GameConfig::default());
        let first = run(&mut s, 300, 1.0);
        s.reset();
        assert_eq!(run(&mut s, 300, 1.0), first);
    }

    #[test]
    fn first_obstacle_waits_one_interval() {
        let mut s = Spawner::new(&GameConfig::default());
        // 0.8 spawns/s: nothing within the first second.
        assert_eq!(count_obstacles(&run(&mut s, 60, 1.0)), 0);
    }

    #[test]
    fn higher_multiplier_spawns_more() {
        let config = GameConfig::default();
        let mut slow = Spawner::new(&config);
        let mut fast = Spawner::new(&config);
        let slow_count = count_obstacles(&run(&mut slow, 60 * 60, 1.0));
        let fast_count = count_obstacles(&run(&mut fast, 60 * 60, 3.0));
        assert!(fast_count > slow_count * 2, "{} vs {}", fast_count, slow_count);
    }

    #[test]
    fn zero_rate_never_spawns() {
        let config = GameConfig {
            spawn_rate: 0.0,
            collectible_rate: 0.0,
            ..GameConfig::default()
        };
        let mut s = Spawner::new(&config);
        assert!(run(&mut s, 6000, 1.0).is_empty());
    }

    #[test]
    fn spawns_at_right_edge_above_ground() {
        let config = GameConfig::default();
        let mut s = Spawner::new(&config);
        for req in run(&mut s, 60 * 30, 1.0) {
            match req {
                SpawnRequest::Obstacle { x, .. } => assert_eq!(x, config.width),
                SpawnRequest::Collectible { x, y, collectible_type } => {
                    assert_eq!(x, config.width);
                    let (_, h) = collectible_type.size();
                    assert!(y + h < config.ground_line());
                }
            }
        }
    }
}
