//! Launcher configuration (`marquee.toml` in the base directory).
//!
//! Every field has a default, so the file is optional and may be partial.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{MarqueeError, Result};

/// File name looked up in the base directory.
pub const CONFIG_FILE: &str = "marquee.toml";

/// Top-level launcher configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub window_title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub fullscreen: bool,
    /// Descriptor subdirectory of the base path.
    pub apps_dir: String,
    /// TTF font; when unset the backend searches common system fonts.
    pub font_path: Option<PathBuf>,
    pub timing: TimingConfig,
    pub gamepad: GamepadConfig,
    pub audio: AudioConfig,
}

/// Delays and durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Quiet period before a background change is committed.
    pub background_debounce_ms: u64,
    /// Background crossfade length.
    pub crossfade_ms: u64,
    /// How long the "launching" status replaces the title.
    pub launch_status_ms: u64,
    pub clock_interval_ms: u64,
    /// Wheel item transition length.
    pub item_transition_ms: u64,
    /// Title slide-in length.
    pub title_slide_ms: u64,
}

/// Game controller polling policy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    /// Stick deflection that counts as a move.
    pub axis_threshold: f32,
    /// Re-trigger suppression after a move.
    pub move_cooldown_ms: u64,
    /// Re-trigger suppression after a confirm.
    pub confirm_cooldown_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Master gain applied to synthesized effects, `0.0..=1.0`.
    pub volume: f32,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            window_title: "Marquee".to_string(),
            screen_width: 1280,
            screen_height: 720,
            fullscreen: true,
            apps_dir: "apps".to_string(),
            font_path: None,
            timing: TimingConfig::default(),
            gamepad: GamepadConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            background_debounce_ms: 150,
            crossfade_ms: 600,
            launch_status_ms: 4000,
            clock_interval_ms: 1000,
            item_transition_ms: 400,
            title_slide_ms: 500,
        }
    }
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            axis_threshold: 0.5,
            move_cooldown_ms: 150,
            confirm_cooldown_ms: 650,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

impl TimingConfig {
    pub fn background_debounce(&self) -> Duration {
        Duration::from_millis(self.background_debounce_ms)
    }

    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }

    pub fn launch_status(&self) -> Duration {
        Duration::from_millis(self.launch_status_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms.max(1))
    }

    pub fn item_transition(&self) -> Duration {
        Duration::from_millis(self.item_transition_ms)
    }

    pub fn title_slide(&self) -> Duration {
        Duration::from_millis(self.title_slide_ms)
    }
}

impl GamepadConfig {
    pub fn move_cooldown(&self) -> Duration {
        Duration::from_millis(self.move_cooldown_ms)
    }

    pub fn confirm_cooldown(&self) -> Duration {
        Duration::from_millis(self.confirm_cooldown_ms)
    }
}

impl LauncherConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MarqueeError::Config(format!("{CONFIG_FILE}: {e}")))
    }

    /// Load `marquee.toml` from `base`. A missing file yields defaults.
    pub fn load(base: &Path) -> Result<Self> {
        let path = base.join(CONFIG_FILE);
        if !path.is_file() {
            log::debug!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| MarqueeError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded {}", path.display());
        Ok(config)
    }
}
