//! Game settings and preferences
//!
//! Persisted separately from the unlock watermark: a JSON file on native,
//! LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS, MIN_GRID_SIZE};
use crate::sim::Grid;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Playfield width in cells
    pub cols: i32,
    /// Playfield height in cells
    pub rows: i32,

    // === Presentation ===
    pub dark_mode: bool,
    /// Play sound cues
    pub sound: bool,

    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            dark_mode: false,
            sound: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Copy with the grid clamped to the smallest playable size
    pub fn validated(&self) -> Self {
        let mut settings = self.clone();
        if settings.cols < MIN_GRID_SIZE || settings.rows < MIN_GRID_SIZE {
            log::warn!(
                "Grid {}x{} too small, clamping to at least {}x{}",
                settings.cols,
                settings.rows,
                MIN_GRID_SIZE,
                MIN_GRID_SIZE
            );
        }
        settings.cols = settings.cols.max(MIN_GRID_SIZE);
        settings.rows = settings.rows.max(MIN_GRID_SIZE);
        settings
    }

    pub fn grid(&self) -> Grid {
        let settings = self.validated();
        Grid::new(settings.cols, settings.rows)
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "snake_levels_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_local() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save_local(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
