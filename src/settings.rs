//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; the native runner can read them
//! from a JSON file.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_PARTICLES;

/// Errors loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown quality preset '{0}' (expected low, medium or high)")]
    UnknownPreset(String),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles drawn for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Segments used for circles
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 20,
            QualityPreset::High => 32,
        }
    }

    /// Whether orbs and enemies get glow halos
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

impl FromStr for QualityPreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(SettingsError::UnknownPreset(s.to_string())),
        }
    }
}

/// When to draw the on-canvas touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TouchControlsMode {
    /// Only on touch-capable displays
    #[default]
    Auto,
    Always,
    Never,
}

impl TouchControlsMode {
    pub fn enabled(&self, touch_capable: bool) -> bool {
        match self {
            TouchControlsMode::Auto => touch_capable,
            TouchControlsMode::Always => true,
            TouchControlsMode::Never => false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle bursts
    pub particles: bool,
    /// Glow halos around orbs and enemies
    pub glow: bool,
    /// Background grid overlay
    pub grid: bool,

    // === Controls ===
    pub touch_controls: TouchControlsMode,

    // === Accessibility ===
    /// Reduced motion (no blinking, static grid)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            glow: true,
            grid: true,
            touch_controls: TouchControlsMode::Auto,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables some effects for performance
        if preset == QualityPreset::Low {
            self.glow = false;
            self.grid = false;
        }
    }

    /// Effective glow (the Low preset never draws halos)
    pub fn effective_glow(&self) -> bool {
        self.glow && self.quality.glow_enabled()
    }

    /// Effective invincibility blink (respects reduced_motion)
    pub fn effective_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective grid drift (respects reduced_motion)
    pub fn effective_grid_drift(&self) -> bool {
        self.grid && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "chroma_blob_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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

    /// Native builds have no LocalStorage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("HIGH".parse::<QualityPreset>().ok(), Some(QualityPreset::High));
        assert_eq!("med".parse::<QualityPreset>().ok(), Some(QualityPreset::Medium));
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(SettingsError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_low_preset_disables_effects() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.effective_glow());
        assert!(!settings.grid);
        assert!(settings.max_particles() < MAX_PARTICLES);

        let mut settings = Settings::from_preset(QualityPreset::High);
        assert!(settings.effective_glow());
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion() {
        let mut settings = Settings::default();
        assert!(settings.effective_blink());
        assert!(settings.effective_grid_drift());
        settings.reduced_motion = true;
        assert!(!settings.effective_blink());
        assert!(!settings.effective_grid_drift());
    }

    #[test]
    fn test_touch_controls_mode() {
        assert!(TouchControlsMode::Auto.enabled(true));
        assert!(!TouchControlsMode::Auto.enabled(false));
        assert!(TouchControlsMode::Always.enabled(false));
        assert!(!TouchControlsMode::Never.enabled(true));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json_str(r#"{"quality":"High","grid":false}"#)
            .expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(!settings.grid);
        assert!(settings.particles);
        assert_eq!(settings.touch_controls, TouchControlsMode::Auto);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json_str("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_path(std::path::Path::new("/nonexistent/chroma.json"));
        assert!(matches!(err, Err(SettingsError::Io { .. })));
    }
}
