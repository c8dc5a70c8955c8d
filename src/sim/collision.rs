//! Collision detection and response
//!
//! Everything in the arena collides as an axis-aligned box. Boxes that
//! merely touch along an edge do not overlap.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `center` extending `half` in every direction
    #[inline]
    pub fn from_center(center: Vec2, half: f32) -> Self {
        let half = Vec2::splat(half);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box from its top-left corner and size
    #[inline]
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    #[inline]
    pub fn translate(&self, by: Vec2) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Check whether two boxes overlap
#[inline]
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Did a falling box land on top of `platform` this frame?
///
/// `prev_bottom` is the bottom edge before integration, `mover` the box
/// after it. Only the crossing of the platform's top edge counts, so a box
/// rising through a platform from below passes through.
pub fn lands_on(prev_bottom: f32, mover: &Aabb, platform: &Aabb) -> bool {
    let top = platform.min.y;
    let crossed = prev_bottom <= top + CONTACT_SLOP && mover.max.y >= top;
    crossed && overlaps_x(mover, platform)
}

/// Is a box with its bottom edge at `bottom` standing on `platform`?
pub fn rests_on(bottom: f32, mover: &Aabb, platform: &Aabb) -> bool {
    (bottom - platform.min.y).abs() <= CONTACT_SLOP && overlaps_x(mover, platform)
}

/// Float drift allowed between a rider's feet and the platform top
const CONTACT_SLOP: f32 = 0.01;

#[inline]
fn overlaps_x(a: &Aabb, b: &Aabb) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x
}

/// Keep a moving body inside `bounds`, reflecting velocity off the walls
pub fn bounce_in_bounds(pos: &mut Vec2, vel: &mut Vec2, half: f32, bounds: Vec2) {
    if pos.x < half {
        pos.x = half;
        vel.x = vel.x.abs();
    } else if pos.x > bounds.x - half {
        pos.x = bounds.x - half;
        vel.x = -vel.x.abs();
    }

    if pos.y < half {
        pos.y = half;
        vel.y = vel.y.abs();
    } else if pos.y > bounds.y - half {
        pos.y = bounds.y - half;
        vel.y = -vel.y.abs();
    }
}

/// Displacement pulling `pos` toward `attractor`, stronger when closer
///
/// Zero outside `radius`.
pub fn magnet_pull(pos: Vec2, attractor: Vec2, radius: f32, strength: f32, speed_scale: f32) -> Vec2 {
    let to_attractor = attractor - pos;
    let dist = to_attractor.length();
    if radius <= 0.0 || dist >= radius || dist < f32::EPSILON {
        return Vec2::ZERO;
    }
    let proximity = 1.0 - dist / radius;
    // Never overshoot the attractor in a single frame
    let step = (strength * proximity * speed_scale).min(dist);
    to_attractor / dist * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_center(Vec2::new(100.0, 100.0), 20.0);
        let b = Aabb::from_center(Vec2::new(130.0, 100.0), 15.0);
        assert!(collides(&a, &b));

        let far = Aabb::from_center(Vec2::new(300.0, 100.0), 15.0);
        assert!(!collides(&a, &far));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::from_center(Vec2::new(20.0, 0.0), 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_lands_on_from_above_only() {
        let platform = Aabb::from_corner(Vec2::new(100.0, 400.0), Vec2::new(150.0, 20.0));

        // Falling through the top edge
        let mover = Aabb::from_center(Vec2::new(150.0, 385.0), 20.0);
        assert!(lands_on(398.0, &mover, &platform));

        // Already below the top on the previous frame (jumping up through it)
        assert!(!lands_on(410.0, &mover, &platform));

        // No horizontal overlap
        let beside = Aabb::from_center(Vec2::new(400.0, 385.0), 20.0);
        assert!(!lands_on(398.0, &beside, &platform));
    }

    #[test]
    fn test_rests_on_top_edge() {
        let platform = Aabb::from_corner(Vec2::new(100.0, 400.0), Vec2::new(150.0, 20.0));
        let feet = Aabb::from_center(Vec2::new(150.0, 380.0), 20.0);
        assert!(rests_on(400.0, &feet, &platform));
        assert!(!rests_on(398.0, &feet, &platform));

        let beside = Aabb::from_center(Vec2::new(400.0, 380.0), 20.0);
        assert!(!rests_on(400.0, &beside, &platform));
    }

    #[test]
    fn test_bounce_reflects_velocity() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut pos = Vec2::new(-5.0, 300.0);
        let mut vel = Vec2::new(-2.0, 1.0);
        bounce_in_bounds(&mut pos, &mut vel, 20.0, bounds);
        assert_eq!(pos.x, 20.0);
        assert_eq!(vel, Vec2::new(2.0, 1.0));

        let mut pos = Vec2::new(400.0, 590.0);
        let mut vel = Vec2::new(0.0, 3.0);
        bounce_in_bounds(&mut pos, &mut vel, 20.0, bounds);
        assert_eq!(pos.y, 580.0);
        assert_eq!(vel.y, -3.0);
    }

    #[test]
    fn test_magnet_pull() {
        let player = Vec2::new(0.0, 0.0);
        // Outside radius: nothing
        assert_eq!(magnet_pull(Vec2::new(200.0, 0.0), player, 150.0, 5.0, 1.0), Vec2::ZERO);
        // No magnet: nothing
        assert_eq!(magnet_pull(Vec2::new(50.0, 0.0), player, 0.0, 5.0, 1.0), Vec2::ZERO);

        let near = magnet_pull(Vec2::new(30.0, 0.0), player, 150.0, 5.0, 1.0);
        let far = magnet_pull(Vec2::new(120.0, 0.0), player, 150.0, 5.0, 1.0);
        assert!(near.x < 0.0 && far.x < 0.0);
        assert!(near.x.abs() > far.x.abs());
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500i32..500, -500i32..500, 1i32..100, 1i32..100).prop_map(|(x, y, w, h)| {
            Aabb::from_corner(Vec2::new(x as f32, y as f32), Vec2::new(w as f32, h as f32))
        })
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn prop_collision_is_translation_invariant(
            a in arb_box(),
            b in arb_box(),
            dx in -1000i32..1000,
            dy in -1000i32..1000,
        ) {
            let offset = Vec2::new(dx as f32, dy as f32);
            prop_assert_eq!(
                collides(&a, &b),
                collides(&a.translate(offset), &b.translate(offset))
            );
        }

        #[test]
        fn prop_box_collides_with_itself(a in arb_box()) {
            prop_assert!(collides(&a, &a));
        }
    }
}
