//! App descriptor files: a flat INI dialect.
//!
//! Sections are `[Name]` headers, entries are `Key = Value` lines. Section
//! and key names are case-sensitive. Lines starting with `;` or `#` are
//! comments. One layer of matching quotes is stripped from values.

use std::collections::HashMap;

use crate::error::{MarqueeError, Result};

/// Section holding the required platform name.
pub const APPLICATION_SECTION: &str = "Application";
/// Section holding optional artwork paths.
pub const ASSETS_SECTION: &str = "Assets";

/// Key/value pairs of one section.
pub type Section = HashMap<String, String>;

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ini {
    root: Section,
    sections: HashMap<String, Section>,
}

impl Ini {
    /// Keys that appeared before any section header.
    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Parse INI text. Never fails: malformed lines are ignored.
pub fn parse_ini(text: &str) -> Ini {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut ini = Ini::default();
    let mut current: Option<String> = None;

    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].trim().to_string();
            ini.sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = unquote(value.trim()).to_string();
        match current {
            Some(ref name) => {
                ini.sections.entry(name.clone()).or_default().insert(key, value);
            },
            None => {
                ini.root.insert(key, value);
            },
        }
    }
    ini
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// The fields the launcher reads from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// `[Application] Platform` -- display name.
    pub platform: String,
    /// `[Application] Location` -- executable path.
    pub location: Option<String>,
    /// `[Assets] Clear Logo` -- transparent logo image.
    pub clear_logo: Option<String>,
    /// `[Assets] Background` -- background image.
    pub background: Option<String>,
}

impl Descriptor {
    /// Validate a parsed document. Requires a non-empty
    /// `[Application] Platform`.
    pub fn from_ini(ini: &Ini) -> Result<Self> {
        let platform = ini
            .get(APPLICATION_SECTION, "Platform")
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                MarqueeError::Descriptor("missing [Application] Platform".to_string())
            })?;

        let non_empty = |section: &str, key: &str| {
            ini.get(section, key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            platform: platform.to_string(),
            location: non_empty(APPLICATION_SECTION, "Location"),
            clear_logo: non_empty(ASSETS_SECTION, "Clear Logo"),
            background: non_empty(ASSETS_SECTION, "Background"),
        })
    }

    /// Parse and validate descriptor text in one step.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_ini(&parse_ini(text))
    }
}
