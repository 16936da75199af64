//! Projectile spawning
//!
//! Main projectiles enter from the right edge; which kinds are eligible is
//! gated by difficulty. Secondaries are fired by Shooter and Fan behaviors.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI};

use super::physics::launch_velocity;
use super::projectile::{Behavior, Projectile, ProjectileKind};
use super::state::Field;
use crate::consts::*;

/// Kinds the spawner may pick at this difficulty, in unlock order
pub fn eligible_kinds(difficulty: u32) -> Vec<ProjectileKind> {
    ProjectileKind::MAIN
        .into_iter()
        .filter(|kind| difficulty >= kind.unlock_difficulty())
        .collect()
}

/// Uniform angle in [-90°, 90°)
pub fn random_launch_angle<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>() * PI - FRAC_PI_2
}

/// Create one main projectile at the right edge of the field
///
/// `difficulty` is clamped to the tier range first.
pub fn spawn_main<R: Rng>(rng: &mut R, field: &Field, difficulty: u32) -> Projectile {
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let kinds = eligible_kinds(difficulty);
    let kind = kinds[rng.random_range(0..kinds.len())];

    let y = rng.random::<f32>() * (field.height - SPAWN_MARGIN * 2.0) + SPAWN_MARGIN;
    let angle = random_launch_angle(rng);
    let speed = BASE_SPEED + rng.random::<f32>() * difficulty as f32;
    let vel = launch_velocity(angle, speed);

    let (inset, behavior) = match kind {
        ProjectileKind::Normal => (SPAWN_INSET_NORMAL, Behavior::Normal),
        ProjectileKind::Orbit => {
            let layer = if rng.random_bool(0.5) { 1 } else { 2 };
            let rotation = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            (SPAWN_INSET, Behavior::orbit(layer, rotation))
        }
        ProjectileKind::Shooter => (SPAWN_INSET, Behavior::shooter()),
        ProjectileKind::Boost => (SPAWN_INSET, Behavior::boost()),
        ProjectileKind::Fan => (SPAWN_INSET, Behavior::fan(angle)),
        // Never in the eligible list
        ProjectileKind::Small => (SPAWN_INSET, Behavior::Small),
    };

    log::debug!(
        "Spawn {} at y={:.0} speed={:.2} (difficulty {})",
        kind.as_str(),
        y,
        speed,
        difficulty
    );

    Projectile::new(Vec2::new(field.width - inset, y), vel, behavior)
}

/// Create one secondary projectile
pub fn spawn_secondary(origin: Vec2, angle: f32, speed: f32) -> Projectile {
    Projectile::new(origin, launch_velocity(angle, speed), Behavior::Small)
}
