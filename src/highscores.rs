//! Best survival time
//!
//! A single scalar (frames survived) persisted under a fixed key.

use crate::persistence::{KeyValueStore, StoreError};

/// Best survival time record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestTime {
    /// Best run length in frames
    pub frames: u64,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highscore";

    /// Load from a store (0 if absent)
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let frames = store.get_u64(Self::STORAGE_KEY, 0);
        log::info!("Best time loaded: {} frames", frames);
        Self { frames }
    }

    /// True when a run of `frames` beats the record
    pub fn beaten_by(&self, frames: u64) -> bool {
        frames > self.frames
    }

    /// Record a finished run; writes through to the store if it is a new best
    ///
    /// Returns `Ok(true)` for a new best. The in-memory value is updated even
    /// if the write fails.
    pub fn record<S: KeyValueStore>(&mut self, store: &mut S, frames: u64) -> Result<bool, StoreError> {
        if !self.beaten_by(frames) {
            return Ok(false);
        }
        self.frames = frames;
        log::info!("New best time: {}", crate::format_survival(frames));
        store.set_u64(Self::STORAGE_KEY, frames)?;
        Ok(true)
    }
}
