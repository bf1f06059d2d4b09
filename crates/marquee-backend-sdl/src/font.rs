//! TTF font discovery and per-size font cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sdl2::ttf::{Font, Sdl2TtfContext};

/// Environment override for the UI font.
pub const FONT_ENV: &str = "MARQUEE_FONT";

/// Common system fonts with Latin Extended coverage, in preference order.
const FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Pick a font file: explicit path, then `MARQUEE_FONT`, then the first
/// system candidate that exists.
pub fn discover_font(configured: Option<&Path>) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(FONT_ENV).map(PathBuf::from))
        .filter(|p| p.is_file())
        .or_else(|| {
            FONT_CANDIDATES
                .iter()
                .map(Path::new)
                .find(|p| p.is_file())
                .map(Path::to_path_buf)
        })
}

/// Lazily opened fonts keyed by point size.
///
/// The TTF context is leaked so fonts can be `'static`; it lives for the
/// whole process anyway.
pub struct FontCache {
    ttf: Option<&'static Sdl2TtfContext>,
    path: Option<PathBuf>,
    fonts: RefCell<HashMap<u16, Option<Font<'static, 'static>>>>,
}

impl FontCache {
    pub fn new(configured: Option<&Path>) -> Self {
        let ttf = match sdl2::ttf::init() {
            Ok(ctx) => Some(&*Box::leak(Box::new(ctx))),
            Err(e) => {
                log::warn!("SDL_ttf unavailable, text disabled: {e}");
                None
            },
        };
        let path = discover_font(configured);
        match &path {
            Some(p) => log::info!("UI font: {}", p.display()),
            None => log::warn!(
                "No TTF font found; set font_path in marquee.toml or {FONT_ENV}. Text disabled."
            ),
        }
        Self {
            ttf,
            path,
            fonts: RefCell::new(HashMap::new()),
        }
    }

    /// Run `f` with the font for `size`, opening it on first use.
    pub fn with_font<R>(&self, size: u16, f: impl FnOnce(&Font<'static, 'static>) -> R) -> Option<R> {
        let (ttf, path) = (self.ttf?, self.path.as_ref()?);
        let mut fonts = self.fonts.borrow_mut();
        let font = fonts.entry(size.max(1)).or_insert_with(|| {
            ttf.load_font(path, size.max(1))
                .map_err(|e| log::warn!("Failed to open {} at {size}pt: {e}", path.display()))
                .ok()
        });
        font.as_ref().map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_font_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("Custom.ttf");
        std::fs::write(&font, b"ttf").unwrap();
        assert_eq!(discover_font(Some(&font)), Some(font.clone()));
    }

    #[test]
    fn missing_configured_font_falls_through() {
        let found = discover_font(Some(Path::new("/no/such/font.ttf")));
        if let Some(p) = found {
            assert!(p.is_file());
        }
    }
}
