//! Vector and physics helpers shared by every projectile kind
//!
//! Pure functions only: no RNG, no state.

use glam::Vec2;

use crate::consts::{HOMING_EPSILON, MAX_REFLECTIONS};

/// Squared distance between two points
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// True when two circles overlap (strictly)
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, radius_sum: f32) -> bool {
    distance_sq(a, b) < radius_sum * radius_sum
}

/// True when a projectile is pressing into the top or bottom wall
///
/// Only counts if the projectile is still moving further into the wall, so a
/// projectile that has already been turned around is left alone.
#[inline]
pub fn touching_wall(pos: Vec2, vel: Vec2, radius: f32, field_height: f32) -> bool {
    (pos.y < radius && vel.y < 0.0) || (pos.y > field_height - radius && vel.y > 0.0)
}

/// Reflect off a horizontal wall
///
/// Inverts vertical velocity and bumps the counter while it is below the cap.
/// Once the cap is reached the velocity passes through unchanged.
#[inline]
pub fn reflect(vel: Vec2, reflections: u8) -> (Vec2, u8) {
    if reflections < MAX_REFLECTIONS {
        (Vec2::new(vel.x, -vel.y), reflections + 1)
    } else {
        (vel, reflections)
    }
}

/// Force horizontal velocity to point left (toward the player side)
#[inline]
pub fn clamp_leftward(vel: Vec2) -> Vec2 {
    if vel.x > 0.0 {
        Vec2::new(-vel.x.abs(), vel.y)
    } else {
        vel
    }
}

/// Unit vector from `from` toward `to`
///
/// `None` when the points (nearly) coincide or the distance is not finite.
pub fn unit_toward(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist < HOMING_EPSILON || !dist.is_finite() {
        None
    } else {
        Some(delta / dist)
    }
}

/// Launch velocity for an angle in [-90°, 90°]
///
/// The x component is mirrored so every launch heads left.
#[inline]
pub fn launch_velocity(angle: f32, speed: f32) -> Vec2 {
    clamp_leftward(Vec2::new(-speed * angle.cos(), speed * angle.sin()))
}

/// True when `pos` lies inside the field grown by `margin` on every side
#[inline]
pub fn within_bounds(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x > -margin && pos.x < width + margin && pos.y > -margin && pos.y < height + margin
}
