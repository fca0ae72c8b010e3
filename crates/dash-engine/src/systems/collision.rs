//! Player-vs-world overlap detection.
//!
//! Runs after every entity update and before render. Obstacles are checked
//! first: an obstacle hit ends the run and any collectible touched in the
//! same tick is not picked up.

use crate::components::collectible::Collectible;
use crate::components::entity::Entity;
use crate::components::obstacle::Obstacle;
use crate::core::physics::{collides, Aabb};
use crate::core::pool::{ObjectPool, PoolHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    /// Terminal. Carries the first obstacle found overlapping.
    ObstacleHit(PoolHandle),
    /// Every collectible the player overlaps this tick, in slot order.
    Collected(Vec<PoolHandle>),
}

pub fn detect(
    player: &Aabb,
    obstacles: &ObjectPool<Obstacle>,
    collectibles: &ObjectPool<Collectible>,
) -> CollisionOutcome {
    if let Some((handle, _)) = obstacles
        .iter_active()
        .find(|(_, o)| collides(player, &o.bounding_box()))
    {
        return CollisionOutcome::ObstacleHit(handle);
    }

    let collected: Vec<PoolHandle> = collectibles
        .iter_active()
        .filter(|(_, c)| !c.collected && collides(player, &c.bounding_box()))
        .map(|(h, _)| h)
        .collect();

    if collected.is_empty() {
        CollisionOutcome::Clear
    } else {
        CollisionOutcome::Collected(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CollectibleType, ObstacleType};
    use crate::core::pool::Poolable;

    const GROUND: f32 = 350.0;

    fn pools() -> (ObjectPool<Obstacle>, ObjectPool<Collectible>) {
        (ObjectPool::new(8, Obstacle::new), ObjectPool::new(8, Collectible::new))
    }

    fn spawn_obstacle(pool: &mut ObjectPool<Obstacle>, x: f32) -> PoolHandle {
        let (h, o) = pool.acquire().unwrap();
        o.configure(ObstacleType::Crate, x, GROUND);
        h
    }

    fn spawn_collectible(pool: &mut ObjectPool<Collectible>, x: f32, y: f32) -> PoolHandle {
        let (h, c) = pool.acquire().unwrap();
        c.configure(CollectibleType::Coin, x, y);
        h
    }

    fn player_box() -> Aabb {
        Aabb::new(80.0, GROUND - 48.0, 32.0, 48.0)
    }

    #[test]
    fn clear_when_nothing_overlaps() {
        let (mut obstacles, mut collectibles) = pools();
        spawn_obstacle(&mut obstacles, 400.0);
        spawn_collectible(&mut collectibles, 500.0, 300.0);
        assert_eq!(detect(&player_box(), &obstacles, &collectibles), CollisionOutcome::Clear);
    }

    #[test]
    fn obstacle_overlap_is_a_hit() {
        let (mut obstacles, collectibles) = pools();
        let h = spawn_obstacle(&mut obstacles, 100.0);
        assert_eq!(
            detect(&player_box(), &obstacles, &collectibles),
            CollisionOutcome::ObstacleHit(h)
        );
    }

    #[test]
    fn obstacle_takes_precedence_over_collectible() {
        let (mut obstacles, mut collectibles) = pools();
        let hit = spawn_obstacle(&mut obstacles, 100.0);
        spawn_collectible(&mut collectibles, 90.0, GROUND - 20.0);
        assert_eq!(
            detect(&player_box(), &obstacles, &collectibles),
            CollisionOutcome::ObstacleHit(hit)
        );
    }

    #[test]
    fn collects_every_overlapping_collectible() {
        let (obstacles, mut collectibles) = pools();
        let a = spawn_collectible(&mut collectibles, 82.0, GROUND - 30.0);
        spawn_collectible(&mut collectibles, 300.0, GROUND - 30.0);
        let b = spawn_collectible(&mut collectibles, 95.0, GROUND - 45.0);
        assert_eq!(
            detect(&player_box(), &obstacles, &collectibles),
            CollisionOutcome::Collected(vec![a, b])
        );
    }

    #[test]
    fn inactive_entities_are_ignored() {
        let (mut obstacles, mut collectibles) = pools();
        let h = spawn_obstacle(&mut obstacles, 100.0);
        obstacles.release(h);
        let c = spawn_collectible(&mut collectibles, 90.0, GROUND - 20.0);
        collectibles.get_mut(c).unwrap().set_active(false);
        assert_eq!(detect(&player_box(), &obstacles, &collectibles), CollisionOutcome::Clear);
    }

    #[test]
    fn jumping_over_an_obstacle_is_clear() {
        let (mut obstacles, collectibles) = pools();
        spawn_obstacle(&mut obstacles, 90.0);
        // Feet 1px above the crate's top edge.
        let airborne = Aabb::new(80.0, GROUND - 32.0 - 48.0 - 1.0, 32.0, 48.0);
        assert_eq!(detect(&airborne, &obstacles, &collectibles), CollisionOutcome::Clear);
    }
}
