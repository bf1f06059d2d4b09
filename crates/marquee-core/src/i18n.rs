//! UI string tables and language selection.

use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tr")]
    Turkish,
}

/// Localized strings consumed by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    pub apps_folder_not_found: &'static str,
    pub no_apps_found: &'static str,
    pub launching: &'static str,
}

const ENGLISH: Strings = Strings {
    apps_folder_not_found: "Apps Folder Not Found",
    no_apps_found: "No Apps Found",
    launching: "LAUNCHING...",
};

const TURKISH: Strings = Strings {
    apps_folder_not_found: "Apps Klasörü Bulunamadı",
    no_apps_found: "Uygulama Bulunamadı",
    launching: "BAŞLATILIYOR...",
};

/// Locale environment variables, most specific first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

impl Language {
    pub const DEFAULT: Language = Language::English;

    /// Two-letter code, also the persisted value.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Turkish => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::English),
            "tr" => Some(Self::Turkish),
            _ => None,
        }
    }

    /// Pick a language from a locale tag such as `tr_TR.UTF-8` or `en-US`.
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_ascii_lowercase().starts_with("tr") {
            Self::Turkish
        } else {
            Self::DEFAULT
        }
    }

    /// Detect the system language from the locale environment.
    pub fn detect() -> Self {
        LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
            .map(|v| Self::from_locale(&v))
            .unwrap_or(Self::DEFAULT)
    }

    /// The other language (the UI offers a two-way toggle).
    pub fn toggle(self) -> Self {
        match self {
            Self::English => Self::Turkish,
            Self::Turkish => Self::English,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Self::English => &ENGLISH,
            Self::Turkish => &TURKISH,
        }
    }

    /// Label for the language toggle button.
    pub fn label(self) -> String {
        self.code().to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_locales_select_turkish() {
        assert_eq!(Language::from_locale("tr"), Language::Turkish);
        assert_eq!(Language::from_locale("tr-TR"), Language::Turkish);
        assert_eq!(Language::from_locale("tr_TR.UTF-8"), Language::Turkish);
    }

    #[test]
    fn other_locales_select_default() {
        assert_eq!(Language::from_locale("en-US"), Language::English);
        assert_eq!(Language::from_locale("de_DE"), Language::English);
        assert_eq!(Language::from_locale(""), Language::English);
    }

    #[test]
    fn toggle_is_an_involution() {
        for lang in [Language::English, Language::Turkish] {
            assert_ne!(lang.toggle(), lang);
            assert_eq!(lang.toggle().toggle(), lang);
        }
    }

    #[test]
    fn codes_round_trip() {
        for lang in [Language::English, Language::Turkish] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn labels_are_uppercase_codes() {
        assert_eq!(Language::English.label(), "EN");
        assert_eq!(Language::Turkish.label(), "TR");
    }

    #[test]
    fn string_tables_differ() {
        assert_eq!(Language::English.strings().launching, "LAUNCHING...");
        assert_eq!(Language::Turkish.strings().launching, "BAŞLATILIYOR...");
        assert_ne!(
            Language::English.strings().no_apps_found,
            Language::Turkish.strings().no_apps_found
        );
    }
}
