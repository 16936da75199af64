//! Game settings and preferences
//!
//! Persisted as JSON, separately from the best time.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};
use crate::sim::Field;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Play area width in pixels
    pub field_width: f32,
    /// Play area height in pixels
    pub field_height: f32,

    // === Input ===
    /// Only mouse pointers move the player (touch/pen ignored)
    pub mouse_only: bool,

    // === Run ===
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show survival time / difficulty overlay
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let field = Field::default();
        Self {
            field_width: field.width,
            field_height: field.height,
            mouse_only: true,
            seed: None,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "barrage_settings";

    /// Simulation field described by these settings
    ///
    /// Degenerate sizes fall back to the default field.
    pub fn field(&self) -> Field {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.field_width) && valid(self.field_height) {
            Field::new(self.field_width, self.field_height)
        } else {
            log::warn!(
                "Invalid field size {}x{}, using default",
                self.field_width,
                self.field_height
            );
            Field::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not parse settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a store
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from storage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a store
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        let json = serde_json::to_string(self).map_err(|_| StoreError::Rejected {
            key: Self::STORAGE_KEY.to_string(),
        })?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}
