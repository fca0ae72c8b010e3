//! Kinematics and axis-aligned overlap tests.
//!
//! Y points down. Velocities are in pixels per fixed tick, so one
//! integration step is a plain add.

use glam::Vec2;

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap. Boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Symmetric AABB overlap test.
#[inline]
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// One semi-implicit Euler step: velocity first, then position.
#[inline]
pub fn integrate(position: &mut Vec2, velocity: &mut Vec2, gravity: f32) {
    velocity.y += gravity;
    *position += *velocity;
}

/// Clamp a body to a floor at `ground_y` (top-left Y at which it rests).
/// Returns true if the body touched or crossed the floor this step.
#[inline]
pub fn clamp_to_ground(position: &mut Vec2, velocity: &mut Vec2, ground_y: f32) -> bool {
    if position.y >= ground_y {
        position.y = ground_y;
        if velocity.y > 0.0 {
            velocity.y = 0.0;
        }
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlapping_boxes_collide() {
        let player = Aabb::new(10.0, 10.0, 20.0, 20.0);
        let obstacle = Aabb::new(20.0, 10.0, 20.0, 20.0);
        assert!(collides(&player, &obstacle));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let player = Aabb::new(10.0, 10.0, 20.0, 20.0);
        let obstacle = Aabb::new(31.0, 10.0, 20.0, 20.0);
        assert!(!collides(&player, &obstacle));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!collides(&a, &below));
    }

    #[test]
    fn containment_collides() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 5.0, 5.0);
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn integrate_then_clamp() {
        let mut pos = Vec2::new(0.0, 95.0);
        let mut vel = Vec2::new(1.0, 4.0);
        integrate(&mut pos, &mut vel, 2.0);
        assert_eq!(pos, Vec2::new(1.0, 101.0));
        assert!(clamp_to_ground(&mut pos, &mut vel, 100.0));
        assert_eq!(pos.y, 100.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn clamp_leaves_airborne_bodies_alone() {
        let mut pos = Vec2::new(0.0, 50.0);
        let mut vel = Vec2::new(0.0, -3.0);
        assert!(!clamp_to_ground(&mut pos, &mut vel, 100.0));
        assert_eq!(vel.y, -3.0);
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }
    }
}
