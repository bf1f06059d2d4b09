//! Immutable per-frame description of what is on screen.
//!
//! The launcher snapshots its state into a [`Scene`]; the renderer only
//! reads it. Chrome geometry lives here so pointer hit testing and drawing
//! agree on where the buttons are.

use std::path::PathBuf;

use crate::crossfade::Layer;
use crate::wheel::ItemRect;

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w as i32 && py < self.y + self.h as i32
    }
}

// ---------------------------------------------------------------------------
// Chrome layout
// ---------------------------------------------------------------------------

pub const MARGIN: i32 = 24;
pub const BUTTON_SIZE: u32 = 44;
pub const BUTTON_GAP: i32 = 12;
pub const TITLE_FONT_SIZE: u16 = 44;
pub const CLOCK_FONT_SIZE: u16 = 26;
pub const BUTTON_FONT_SIZE: u16 = 18;
pub const GLYPH_FONT_SIZE: u16 = 56;
/// Title baseline as a fraction of viewport height.
pub const TITLE_RATIO: f32 = 0.84;
/// Distance the title travels while sliding in.
pub const TITLE_SLIDE_PX: f32 = 30.0;

/// Positions of the fixed on-screen controls for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub exit_button: Rect,
    pub language_button: Rect,
    pub clock_origin: (i32, i32),
}

impl Chrome {
    /// Clock top-left; language and exit buttons top-right, exit outermost.
    pub fn for_viewport(width: u32, _height: u32) -> Self {
        let right = width as i32 - MARGIN;
        let exit_x = right - BUTTON_SIZE as i32;
        let lang_x = exit_x - BUTTON_GAP - BUTTON_SIZE as i32;
        Self {
            exit_button: Rect::new(exit_x, MARGIN, BUTTON_SIZE, BUTTON_SIZE),
            language_button: Rect::new(lang_x, MARGIN, BUTTON_SIZE, BUTTON_SIZE),
            clock_origin: (MARGIN, MARGIN + 8),
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One wheel item ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    /// Index into the carousel entries.
    pub index: usize,
    pub rect: ItemRect,
    pub opacity: f32,
    pub active: bool,
    pub z_order: i32,
    pub logo: Option<PathBuf>,
    /// Fallback glyph when no logo is shown.
    pub initial: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleView {
    pub text: String,
    /// Vertical displacement from the resting position, pixels.
    pub offset_y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: (u32, u32),
    /// Bottom layer first.
    pub background: Vec<Layer>,
    /// Ascending z order.
    pub items: Vec<SceneItem>,
    pub title: TitleView,
    pub clock: String,
    pub language_label: String,
    pub chrome: Chrome,
}
