//! Barrage - A side-scrolling bullet-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, projectile behaviors, collisions, difficulty)
//! - `session`: Frame driver with game over / restart bookkeeping
//! - `renderer`: Per-frame drawable snapshot (and the Canvas2D painter on web)
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Key-value storage for the best survival time
//! - `settings`: Field size and input preferences

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::BestTime;
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Rendered frames per second the display callback is assumed to run at
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Physics micro-steps per rendered frame
    pub const MICRO_STEPS: u32 = 5;
    /// Fraction of per-frame velocity applied each micro-step
    pub const SUB_STEP: f32 = 1.0 / MICRO_STEPS as f32;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Width of the player's band as a fraction of the field width
    pub const PLAYER_AREA_FRACTION: f32 = 0.35;

    /// Main projectile radius
    pub const PROJECTILE_RADIUS: f32 = 10.0;
    /// Secondary (small) projectile radius
    pub const SMALL_RADIUS: f32 = 8.0;
    /// Satellites are drawn at this radius...
    pub const SATELLITE_RADIUS: f32 = 8.0;
    /// ...but only hit within this one
    pub const SATELLITE_HIT_RADIUS: f32 = 6.0;

    /// Vertical inset of the spawn band
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Spawn x inset from the right edge (Normal kind)
    pub const SPAWN_INSET_NORMAL: f32 = 20.0;
    /// Spawn x inset from the right edge (all other kinds)
    pub const SPAWN_INSET: f32 = 30.0;
    /// Base launch speed; a random share of the difficulty is added on top
    pub const BASE_SPEED: f32 = 4.0;

    /// Wall reflections allowed per projectile
    pub const MAX_REFLECTIONS: u8 = 5;
    /// Projectiles are culled this far outside the field
    pub const CULL_MARGIN: f32 = 30.0;

    /// Orbit satellite rotation (radians per micro-step)
    pub const ORBIT_ANGULAR_RATE: f32 = 0.002;
    /// Inner satellite ring distance
    pub const ORBIT_INNER_DIST: f32 = 100.0;
    /// Outer satellite ring distance (layer 2, satellites 3..6)
    pub const ORBIT_OUTER_DIST: f32 = 200.0;
    /// Satellites per layer
    pub const SATELLITES_PER_LAYER: usize = 3;

    /// Shooter fire period is `SHOOTER_PERIOD - difficulty * SHOOTER_PERIOD_STEP` micro-steps
    pub const SHOOTER_PERIOD: u32 = 300;
    pub const SHOOTER_PERIOD_STEP: u32 = 5;
    /// Shooter secondary speed is `SHOOTER_SHOT_SPEED + difficulty`
    pub const SHOOTER_SHOT_SPEED: f32 = 3.5;

    /// Boost stalls once it crosses this multiple of the player band width
    pub const BOOST_STALL_LINE: f32 = 1.3;
    /// Stall micro-steps before homing
    pub const BOOST_STALL_TICKS: u32 = 80;
    /// Share of the homing vector added to velocity each micro-step
    pub const BOOST_ACCEL: f32 = 0.1;
    /// Below this distance the homing direction falls back to straight left
    pub const HOMING_EPSILON: f32 = 1e-3;

    /// Fan burst fires after this many micro-steps
    pub const FAN_DELAY: u32 = 40;
    /// Angle between adjacent fan shots (radians)
    pub const FAN_SPREAD: f32 = 0.15;
    /// Shots either side of the base angle
    pub const FAN_HALF_WIDTH: i32 = 2;
    /// Fan secondary speed is `FAN_SHOT_SPEED + difficulty * FAN_SHOT_SPEED_STEP`
    pub const FAN_SHOT_SPEED: f32 = 3.2;
    pub const FAN_SHOT_SPEED_STEP: f32 = 0.5;

    /// Frames between difficulty increments
    pub const DIFFICULTY_PERIOD: u64 = 600;
    pub const MIN_DIFFICULTY: u32 = 1;
    pub const MAX_DIFFICULTY: u32 = 5;
    /// Spawn cadence is `max(MIN_SPAWN_CADENCE, BASE_SPAWN_CADENCE - difficulty * SPAWN_CADENCE_STEP)`
    pub const BASE_SPAWN_CADENCE: u32 = 60;
    pub const SPAWN_CADENCE_STEP: u32 = 7;
    pub const MIN_SPAWN_CADENCE: u32 = 20;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Survival time in seconds for a frame count
#[inline]
pub fn elapsed_seconds(frames: u64) -> f32 {
    frames as f32 / consts::FRAMES_PER_SECOND as f32
}

/// Format a frame count as survival seconds with one decimal ("12.3s")
pub fn format_survival(frames: u64) -> String {
    format!("{:.1}s", elapsed_seconds(frames))
}
