//! Persisted client preferences.
//!
//! A tiny TOML file under the user's config directory holding the chosen
//! UI language (`app_lang`). Absent on first run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};
use crate::i18n::Language;

/// Preferences file name inside the app's config directory.
pub const PREFS_FILE: &str = "prefs.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_lang: Option<Language>,
}

impl Preferences {
    /// Default location: `<config_dir>/marquee/prefs.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("marquee").join(PREFS_FILE))
    }

    /// Load preferences. A missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                return Self::default();
            },
        };
        toml::from_str(&text).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt {}: {e}", path.display());
            Self::default()
        })
    }

    /// Write preferences, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(self)?;
        std::fs::write(path, text)
            .map_err(|e| MarqueeError::Config(format!("{}: {e}", path.display())))
    }

    /// The stored language, or the system locale's on first run.
    pub fn language(&self) -> Language {
        self.app_lang.unwrap_or_else(Language::detect)
    }
}
