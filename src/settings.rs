//! Player preferences
//!
//! Cosmetic only: nothing here feeds the simulation, so two runs with the
//! same seed and inputs play out identically whatever the settings.
//! Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Visuals ===
    /// Rotate the drone sprite with its vertical velocity
    pub avatar_tilt: bool,
    /// Draw the cloud layer
    pub clouds: bool,
    /// Draw the billboard
    pub billboard: bool,

    // === Accessibility ===
    /// Reduced motion (no sprite rotation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            avatar_tilt: true,
            clouds: true,
            billboard: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective avatar tilt (respects reduced_motion)
    pub fn effective_avatar_tilt(&self) -> bool {
        self.avatar_tilt && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_drone_settings";

    /// Parse stored settings, falling back to defaults on garbage
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("Using default settings ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
