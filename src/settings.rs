//! Game settings and preferences
//!
//! Persisted separately from high scores as a small JSON file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence;

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

    /// Sprite scaling multiplier, applied by the renderer at asset load
    pub fn scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.8,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.2,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(SettingsError::InvalidValue(s.to_string())),
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the player's forward speed is controlled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccelerationMode {
    /// Manual accelerate / brake, coasting when neither is held
    #[default]
    Pedal,
    /// Constant forward cruise
    Auto,
}

impl AccelerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccelerationMode::Pedal => "Pedal",
            AccelerationMode::Auto => "Auto",
        }
    }
}

impl FromStr for AccelerationMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pedal" | "manual" => Ok(AccelerationMode::Pedal),
            "auto" => Ok(AccelerationMode::Auto),
            _ => Err(SettingsError::InvalidValue(s.to_string())),
        }
    }
}

impl fmt::Display for AccelerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("value {value:?} does not fit setting {key:?}")]
    TypeMismatch { key: SettingKey, value: SettingValue },
    #[error("invalid setting value: {0}")]
    InvalidValue(String),
}

/// Keys for dynamic settings access (settings dialog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    SoundVolume,
    GraphicsQuality,
    AccelerationMode,
}

/// A setting value as seen through [`SettingKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Volume(u8),
    Quality(QualityPreset),
    Mode(AccelerationMode),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound volume (0 - 100)
    pub sound_volume: u8,
    /// Graphics quality preset
    pub graphics_quality: QualityPreset,
    /// Forward speed control scheme, read by the simulation every tick
    pub acceleration_mode: AccelerationMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 50,
            graphics_quality: QualityPreset::Medium,
            acceleration_mode: AccelerationMode::Pedal,
        }
    }
}

impl Settings {
    pub const MAX_VOLUME: u8 = 100;
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::SoundVolume => SettingValue::Volume(self.sound_volume),
            SettingKey::GraphicsQuality => SettingValue::Quality(self.graphics_quality),
            SettingKey::AccelerationMode => SettingValue::Mode(self.acceleration_mode),
        }
    }

    /// Update one setting. Volume is clamped to 0 - 100.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        match (key, value) {
            (SettingKey::SoundVolume, SettingValue::Volume(v)) => {
                self.sound_volume = v.min(Self::MAX_VOLUME)
            }
            (SettingKey::GraphicsQuality, SettingValue::Quality(q)) => self.graphics_quality = q,
            (SettingKey::AccelerationMode, SettingValue::Mode(m)) => self.acceleration_mode = m,
            (key, value) => return Err(SettingsError::TypeMismatch { key, value }),
        }
        Ok(())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(Some(mut settings)) => {
                settings.sound_volume = settings.sound_volume.min(Self::MAX_VOLUME);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings file {} unreadable ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`; failures are logged
    pub fn save(&self, path: &Path) {
        match persistence::write_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
        }
    }
}
