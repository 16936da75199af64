//! Player vs projectile collision detection
//!
//! Circle-circle overlap against every projectile body, plus every satellite
//! of Orbit projectiles. Any overlap kills the player.

use serde::{Deserialize, Serialize};

use super::physics::circles_overlap;
use super::projectile::Projectile;
use super::state::Player;
use crate::consts::SATELLITE_HIT_RADIUS;

/// Which part of a projectile touched the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPart {
    Body,
    Satellite(usize),
}

/// First breach found in a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Index into the projectile collection
    pub index: usize,
    pub part: HitPart,
}

/// Find the first projectile part overlapping the player
///
/// Order: collection order; within an Orbit projectile its satellites (by
/// index) are tested before its body.
pub fn find_hit(player: &Player, projectiles: &[Projectile]) -> Option<Hit> {
    projectiles.iter().enumerate().find_map(|(index, projectile)| {
        let satellite = projectile
            .satellites()
            .into_iter()
            .position(|sat| circles_overlap(player.pos, sat, player.radius + SATELLITE_HIT_RADIUS));
        if let Some(i) = satellite {
            return Some(Hit {
                index,
                part: HitPart::Satellite(i),
            });
        }
        circles_overlap(player.pos, projectile.pos, player.radius + projectile.radius).then_some(Hit {
            index,
            part: HitPart::Body,
        })
    })
}

/// True if any projectile (or satellite) overlaps the player
pub fn check_collisions(player: &Player, projectiles: &[Projectile]) -> bool {
    find_hit(player, projectiles).is_some()
}
