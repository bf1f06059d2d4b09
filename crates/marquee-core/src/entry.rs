//! Launchable entries and the fallback gradient palette.

use std::path::PathBuf;

use crate::backend::Color;

/// A two-stop 135-degree gradient (top-left to bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
}

impl Gradient {
    pub const fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }

    /// Color at normalized coordinates `(u, v)` in `[0, 1]`.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        self.from.lerp(self.to, (u + v) * 0.5)
    }

    /// Render the gradient into a `w` x `h` RGBA buffer.
    pub fn rasterize(&self, w: u32, h: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((w * h * 4) as usize);
        let du = if w > 1 { 1.0 / (w - 1) as f32 } else { 0.0 };
        let dv = if h > 1 { 1.0 / (h - 1) as f32 } else { 0.0 };
        for y in 0..h {
            for x in 0..w {
                let c = self.sample(x as f32 * du, y as f32 * dv);
                pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        pixels
    }
}

/// Fallback backgrounds, assigned round-robin by descriptor position.
pub const GRADIENT_PALETTE: [Gradient; 5] = [
    Gradient::new(Color::hex(0x000000), Color::hex(0x0d2538)),
    Gradient::new(Color::hex(0x0f0514), Color::hex(0x3e1852)),
    Gradient::new(Color::hex(0x210404), Color::hex(0x631111)),
    Gradient::new(Color::hex(0x04101c), Color::hex(0x10426b)),
    Gradient::new(Color::hex(0x0b0d12), Color::hex(0x1b2838)),
];

/// Palette gradient for the descriptor at `position`.
pub fn gradient_for(position: usize) -> Gradient {
    GRADIENT_PALETTE[position % GRADIENT_PALETTE.len()]
}

/// Why a synthetic entry was injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// The descriptor directory could not be found or created.
    FolderMissing,
    /// The directory exists but holds no valid descriptors.
    NoApps,
}

impl PlaceholderKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::FolderMissing => "error",
            Self::NoApps => "demo",
        }
    }
}

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Descriptor,
    Placeholder(PlaceholderKind),
}

/// One discovered launchable item.
#[derive(Debug, Clone, PartialEq)]
pub struct AppEntry {
    /// Derived from the descriptor file name; unique within one load.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Executable path. Empty means "not launchable".
    pub path: String,
    /// Resolved clear-logo path.
    pub logo: Option<PathBuf>,
    /// Resolved background image path.
    pub background: Option<PathBuf>,
    /// Used whenever no background image can be shown.
    pub bg_gradient: Gradient,
    pub kind: EntryKind,
}

impl AppEntry {
    /// Build the synthetic non-launchable entry.
    pub fn placeholder(kind: PlaceholderKind, name: &str) -> Self {
        Self {
            id: kind.id().to_string(),
            name: name.to_string(),
            path: String::new(),
            logo: None,
            background: None,
            bg_gradient: GRADIENT_PALETTE[0],
            kind: EntryKind::Placeholder(kind),
        }
    }

    pub fn placeholder_kind(&self) -> Option<PlaceholderKind> {
        match self.kind {
            EntryKind::Placeholder(k) => Some(k),
            EntryKind::Descriptor => None,
        }
    }

    /// Placeholders and entries without a `Location` cannot be launched.
    pub fn is_launchable(&self) -> bool {
        self.kind == EntryKind::Descriptor && !self.path.is_empty()
    }

    /// First character of the name, used as the tile glyph when no logo
    /// can be shown.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}
