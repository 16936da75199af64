//! Difficulty escalation over survival time

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Elapsed frame counter plus the difficulty tier it drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    elapsed: u64,
    level: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

impl Difficulty {
    pub fn new() -> Self {
        Self {
            elapsed: 0,
            level: MIN_DIFFICULTY,
        }
    }

    /// Frames survived
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Current tier (1..=5)
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Frames between spawn attempts at the current tier
    pub fn spawn_cadence(&self) -> u32 {
        spawn_cadence_for(self.level)
    }

    /// True on frames where the spawner should run
    pub fn spawn_due(&self) -> bool {
        self.elapsed % self.spawn_cadence() as u64 == 0
    }

    /// Advance one rendered frame
    ///
    /// Returns the new tier when it went up.
    pub fn advance(&mut self) -> Option<u32> {
        self.elapsed += 1;
        if self.elapsed % DIFFICULTY_PERIOD == 0 && self.level < MAX_DIFFICULTY {
            self.level += 1;
            return Some(self.level);
        }
        None
    }
}

/// Spawn cadence for a tier: `max(20, 60 - tier * 7)`
pub fn spawn_cadence_for(level: u32) -> u32 {
    BASE_SPAWN_CADENCE
        .saturating_sub(level * SPAWN_CADENCE_STEP)
        .max(MIN_SPAWN_CADENCE)
}
