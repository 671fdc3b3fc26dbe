//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs-engine/settings.toml (or platform equivalent)

use crate::bag::MAX_PREVIEW;
use crate::error::{GameError, SettingsError};
use crate::lockdown::{DEFAULT_BACKLASH_FRAMES, DEFAULT_MAX_MANIPULATIONS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gravity, lock-down and preview tuning
    pub gameplay: GameplaySettings,
    /// Key repeat and debounce timing, in ticks
    pub controls: ControlSettings,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed simulation rate of the outer loop
    pub ticks_per_second: u32,
    /// Level stops rising here
    pub max_level: u32,
    /// Seconds per gravity step at level 1
    pub base_drop_seconds: f64,
    /// Seconds shaved off the gravity step per level
    pub level_speedup_seconds: f64,
    /// Soft drop divides the gravity interval by this
    pub soft_drop_factor: u32,
    /// Ticks a grounded piece may rest before locking
    pub backlash_frames: u32,
    /// Moves/rotations allowed while grounded
    pub max_manipulations: u32,
    /// Number of upcoming pieces exposed to the renderer (1..=7)
    pub preview_len: usize,
}

/// Controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Delayed Auto Shift: ticks a direction must be held before repeating
    pub das_frames: u32,
    /// Auto Repeat Rate: ticks between repeats once DAS has elapsed
    pub arr_frames: u32,
    /// Ticks the restart key must be held before it fires
    pub restart_hold_frames: u32,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            max_level: 15,
            base_drop_seconds: 0.8,
            level_speedup_seconds: 0.05,
            soft_drop_factor: 20,
            backlash_frames: DEFAULT_BACKLASH_FRAMES,
            max_manipulations: DEFAULT_MAX_MANIPULATIONS,
            preview_len: 6,
        }
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            das_frames: 9,
            arr_frames: 2,
            restart_hold_frames: 30,
        }
    }
}

impl GameplaySettings {
    /// Level reached after clearing `cleared_lines` lines
    pub fn level_for(&self, cleared_lines: u32) -> u32 {
        (cleared_lines / 10 + 1).clamp(1, self.max_level.max(1))
    }

    /// Ticks per one-row gravity step at `level`, never below 1
    pub fn drop_interval(&self, level: u32) -> u32 {
        let seconds =
            self.base_drop_seconds - self.level_speedup_seconds * level.saturating_sub(1) as f64;
        (seconds * self.ticks_per_second as f64).round().max(1.0) as u32
    }

    /// Gravity interval while soft drop is held
    pub fn soft_drop_interval(&self, interval: u32) -> u32 {
        (interval / self.soft_drop_factor.max(1)).max(1)
    }

    /// Reject values that would break gravity or lock-down
    pub fn validate(&self) -> Result<(), GameError> {
        let n = self.preview_len;
        if n == 0 || n > MAX_PREVIEW {
            return Err(GameError::InvalidPreviewSize(n));
        }
        for (name, value) in [
            ("ticks_per_second", self.ticks_per_second),
            ("backlash_frames", self.backlash_frames),
            ("max_manipulations", self.max_manipulations),
        ] {
            if value == 0 {
                return Err(GameError::ZeroSetting(name));
            }
        }
        Ok(())
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs-engine")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default location, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the engine treats as contract violations
    pub fn validate(&self) -> Result<(), GameError> {
        self.gameplay.validate()
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
