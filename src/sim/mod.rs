//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed micro-steps only (five per rendered frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod physics;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Hit, HitPart, check_collisions, find_hit};
pub use difficulty::{Difficulty, spawn_cadence_for};
pub use motion::{StepContext, advance, cull, step_all};
pub use physics::reflect;
pub use projectile::{Behavior, Projectile, ProjectileKind, SECONDARY_COLOR};
pub use spawner::{eligible_kinds, spawn_main, spawn_secondary};
pub use state::{Field, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
