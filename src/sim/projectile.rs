//! Projectile entities
//!
//! One struct for the shared kinematic state, one enum carrying whatever each
//! kind needs on top of it. Behavior lives in `motion`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_3;

use crate::consts::*;
use crate::polar_to_cartesian;

/// Plain discriminator, handy for logging, events and spawn tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Normal,
    Orbit,
    Shooter,
    Boost,
    Fan,
    Small,
}

impl ProjectileKind {
    /// Kinds the spawner may pick (secondaries are never spawned directly)
    pub const MAIN: [ProjectileKind; 5] = [
        ProjectileKind::Normal,
        ProjectileKind::Orbit,
        ProjectileKind::Shooter,
        ProjectileKind::Boost,
        ProjectileKind::Fan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Normal => "Normal",
            ProjectileKind::Orbit => "Orbit",
            ProjectileKind::Shooter => "Shooter",
            ProjectileKind::Boost => "Boost",
            ProjectileKind::Fan => "Fan",
            ProjectileKind::Small => "Small",
        }
    }

    /// Lowest difficulty at which the spawner may pick this kind
    pub fn unlock_difficulty(&self) -> u32 {
        match self {
            ProjectileKind::Normal => 1,
            ProjectileKind::Orbit => 2,
            ProjectileKind::Shooter => 3,
            ProjectileKind::Boost => 4,
            ProjectileKind::Fan => 5,
            // Only ever fired by Shooter/Fan
            ProjectileKind::Small => u32::MAX,
        }
    }

    /// Visual tag for this kind (RGB)
    pub fn color(&self) -> u32 {
        match self {
            ProjectileKind::Normal => 0xff4444,
            ProjectileKind::Orbit => 0x44aaff,
            ProjectileKind::Shooter => 0xffff44,
            ProjectileKind::Boost => 0x44ff44,
            ProjectileKind::Fan => 0xff44ff,
            ProjectileKind::Small => SECONDARY_COLOR,
        }
    }
}

/// Color shared by secondaries and orbit satellites
pub const SECONDARY_COLOR: u32 = 0xaaaaff;

/// Kind-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Straight line
    Normal,
    /// Carries rotating satellites
    Orbit {
        /// Satellite angles (radians), `layer * 3` of them
        angles: Vec<f32>,
        /// 1 or 2 satellite rings
        layer: u8,
        /// +1 or -1
        rotation: f32,
    },
    /// Periodically fires a secondary
    Shooter { fire_timer: u32 },
    /// Stalls near the player band, then homes in
    Boost {
        stall_timer: u32,
        boosted: bool,
        accel: Vec2,
    },
    /// Fires one five-shot burst after a delay
    Fan {
        fan_timer: u32,
        fired: bool,
        base_angle: f32,
    },
    /// Secondary projectile, pure ballistic
    Small,
}

impl Behavior {
    /// Fresh orbit payload with evenly spread satellites
    ///
    /// The outer ring of a layer-2 orbit is nudged by a third of a turn past
    /// the fourth satellite so the rings don't line up.
    pub fn orbit(layer: u8, rotation: f32) -> Self {
        let count = layer as usize * SATELLITES_PER_LAYER;
        let angles = (0..count)
            .map(|i| (i * 2 + usize::from(i > 3)) as f32 * FRAC_PI_3)
            .collect();
        Behavior::Orbit {
            angles,
            layer,
            rotation,
        }
    }

    pub fn shooter() -> Self {
        Behavior::Shooter { fire_timer: 0 }
    }

    pub fn boost() -> Self {
        Behavior::Boost {
            stall_timer: 0,
            boosted: false,
            accel: Vec2::ZERO,
        }
    }

    pub fn fan(base_angle: f32) -> Self {
        Behavior::Fan {
            fan_timer: 0,
            fired: false,
            base_angle,
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        match self {
            Behavior::Normal => ProjectileKind::Normal,
            Behavior::Orbit { .. } => ProjectileKind::Orbit,
            Behavior::Shooter { .. } => ProjectileKind::Shooter,
            Behavior::Boost { .. } => ProjectileKind::Boost,
            Behavior::Fan { .. } => ProjectileKind::Fan,
            Behavior::Small => ProjectileKind::Small,
        }
    }
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Velocity per rendered frame
    pub vel: Vec2,
    pub radius: f32,
    /// RGB visual tag
    pub color: u32,
    /// Wall reflections so far (capped at `MAX_REFLECTIONS`)
    pub reflections: u8,
    pub behavior: Behavior,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, behavior: Behavior) -> Self {
        let kind = behavior.kind();
        let radius = match kind {
            ProjectileKind::Small => SMALL_RADIUS,
            _ => PROJECTILE_RADIUS,
        };
        Self {
            pos,
            vel,
            radius,
            color: kind.color(),
            reflections: 0,
            behavior,
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        self.behavior.kind()
    }

    /// Absolute satellite positions (empty for non-orbit kinds)
    pub fn satellites(&self) -> Vec<Vec2> {
        match &self.behavior {
            Behavior::Orbit { angles, layer, .. } => angles
                .iter()
                .enumerate()
                .map(|(i, &theta)| self.pos + polar_to_cartesian(satellite_distance(*layer, i), theta))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Boost charge-up progress in [0, 1], `None` once boosted or for other kinds
    pub fn charge_progress(&self) -> Option<f32> {
        match self.behavior {
            Behavior::Boost {
                stall_timer,
                boosted: false,
                ..
            } => Some((stall_timer as f32 / BOOST_STALL_TICKS as f32).min(1.0)),
            _ => None,
        }
    }
}

/// Distance of satellite `index` from its orbit's center
///
/// Layer-2 orbits put satellites 3.. on the outer ring.
#[inline]
pub fn satellite_distance(layer: u8, index: usize) -> f32 {
    if layer == 2 && index >= SATELLITES_PER_LAYER {
        ORBIT_OUTER_DIST
    } else {
        ORBIT_INNER_DIST
    }
}
