//! Game state and core simulation types
//!
//! Everything the frame driver mutates lives in `GameState`; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hit;
use super::difficulty::Difficulty;
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player was hit; simulation frozen until restart
    GameOver,
}

/// Play area dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the left band the player is confined to
    pub fn player_area(&self) -> f32 {
        self.width * PLAYER_AREA_FRACTION
    }

    /// Player start position: middle of the player band
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_area() / 2.0, self.height / 2.0)
    }

    /// Clamp a pointer position into the player band, inset by the player radius
    pub fn clamp_to_player_area(&self, pos: Vec2) -> Vec2 {
        let max_x = (self.player_area() - PLAYER_RADIUS).max(PLAYER_RADIUS);
        let max_y = (self.height - PLAYER_RADIUS).max(PLAYER_RADIUS);
        Vec2::new(
            pos.x.clamp(PLAYER_RADIUS, max_x),
            pos.y.clamp(PLAYER_RADIUS, max_y),
        )
    }
}

/// The player's dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            alive: true,
        }
    }
}

/// Things that happened during a frame, drained by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A main projectile entered the field
    Spawned(ProjectileKind),
    /// Shooter or Fan released secondaries
    SecondaryFired { from: ProjectileKind, count: u32 },
    /// Difficulty tier went up
    DifficultyUp(u32),
    /// Player was hit
    PlayerHit(Hit),
    /// Run ended after this many survived frames
    GameOver { elapsed_frames: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for spawns and secondary angles
    pub rng: Pcg32,
    pub field: Field,
    pub phase: GamePhase,
    pub player: Player,
    /// Active projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Elapsed frames and difficulty tier
    pub difficulty: Difficulty,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, field: Field) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            phase: GamePhase::Running,
            player: Player::new(field.player_start()),
            projectiles: Vec::new(),
            difficulty: Difficulty::new(),
            events: Vec::new(),
        }
    }

    /// Reset player, projectiles, elapsed time and difficulty for a new run
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed, self.field);
    }

    /// Frames survived so far
    pub fn elapsed_frames(&self) -> u64 {
        self.difficulty.elapsed()
    }

    /// Move the player toward a pointer position (clamped to the player band)
    pub fn set_player_target(&mut self, pointer: Vec2) {
        self.player.pos = self.field.clamp_to_player_area(pointer);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
