//! Decoded image and gradient textures.
//!
//! Logos and backgrounds are decoded with the `image` crate and uploaded
//! through [`RenderBackend::load_texture`]. A path that fails to decode is
//! remembered so the failure is logged once and the caller falls back to
//! the gradient or the initial glyph on every later frame.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::backend::{Color, RenderBackend, TextureId};
use crate::entry::{AppEntry, Gradient};
use crate::error::{MarqueeError, Result};

/// Edge of the rasterized gradient texture; scaled to the viewport on blit.
pub const GRADIENT_TEXTURE_SIZE: u32 = 64;

/// Edge of the rasterized fallback tile; scaled to the item size on blit.
pub const TILE_TEXTURE_SIZE: u32 = 128;

/// A texture plus its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Decode an image file into RGBA8.
pub fn decode_rgba(path: &Path) -> Result<(u32, u32, Vec<u8>)> {
    let img = image::open(path)
        .map_err(|e| MarqueeError::Asset(format!("{}: {e}", path.display())))?
        .into_rgba8();
    let (w, h) = img.dimensions();
    Ok((w, h, img.into_raw()))
}

/// RGBA pixels of a `size` square filled with `color`, corners rounded by
/// `radius`. Pixels outside the rounded corners are transparent.
pub fn rounded_tile_rgba(size: u32, radius: u32, color: Color) -> Vec<u8> {
    let r = radius.min(size / 2) as f32;
    let edge = size as f32;
    let mut px = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            // Distance into the nearest corner square, zero along the edges.
            let dx = (r - fx).max(fx - (edge - r)).max(0.0);
            let dy = (r - fy).max(fy - (edge - r)).max(0.0);
            let inside = dx * dx + dy * dy <= r * r;
            let a = if inside { color.a } else { 0 };
            px.extend_from_slice(&[color.r, color.g, color.b, a]);
        }
    }
    px
}

#[derive(Default)]
pub struct TextureCache {
    /// `None` marks a path that failed to decode or upload.
    images: HashMap<PathBuf, Option<Texture>>,
    gradients: HashMap<Gradient, Texture>,
    tiles: HashMap<Color, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for an image path, decoding it on first use.
    pub fn image(&mut self, path: &Path, backend: &mut dyn RenderBackend) -> Option<Texture> {
        if let Some(cached) = self.images.get(path) {
            return *cached;
        }
        let loaded = match decode_rgba(path).and_then(|(w, h, px)| {
            backend.load_texture(w, h, &px).map(|id| Texture {
                id,
                width: w,
                height: h,
            })
        }) {
            Ok(tex) => {
                log::debug!("Loaded {} ({}x{})", path.display(), tex.width, tex.height);
                Some(tex)
            },
            Err(e) => {
                log::warn!("Image unavailable, using fallback: {e}");
                None
            },
        };
        self.images.insert(path.to_path_buf(), loaded);
        loaded
    }

    /// Texture for a fallback gradient, rasterized on first use.
    pub fn gradient(&mut self, gradient: Gradient, backend: &mut dyn RenderBackend) -> Option<Texture> {
        if let Some(tex) = self.gradients.get(&gradient) {
            return Some(*tex);
        }
        let size = GRADIENT_TEXTURE_SIZE;
        match backend.load_texture(size, size, &gradient.rasterize(size, size)) {
            Ok(id) => {
                let tex = Texture {
                    id,
                    width: size,
                    height: size,
                };
                self.gradients.insert(gradient, tex);
                Some(tex)
            },
            Err(e) => {
                log::warn!("Gradient texture upload failed: {e}");
                None
            },
        }
    }

    /// Rounded tile texture in `color`, rasterized on first use.
    pub fn tile(
        &mut self,
        color: Color,
        radius: u32,
        backend: &mut dyn RenderBackend,
    ) -> Option<Texture> {
        if let Some(tex) = self.tiles.get(&color) {
            return Some(*tex);
        }
        let size = TILE_TEXTURE_SIZE;
        match backend.load_texture(size, size, &rounded_tile_rgba(size, radius, color)) {
            Ok(id) => {
                let tex = Texture {
                    id,
                    width: size,
                    height: size,
                };
                self.tiles.insert(color, tex);
                Some(tex)
            },
            Err(e) => {
                log::warn!("Tile texture upload failed: {e}");
                None
            },
        }
    }

    /// Decode every logo and background up front. Returns how many images
    /// are ready.
    pub fn preload(&mut self, entries: &[AppEntry], backend: &mut dyn RenderBackend) -> usize {
        let mut ready = 0;
        for entry in entries {
            for path in [&entry.logo, &entry.background].into_iter().flatten() {
                if path.is_file() && self.image(path, backend).is_some() {
                    ready += 1;
                }
            }
            let _ = self.gradient(entry.bg_gradient, backend);
        }
        log::info!("Preloaded {ready} image(s)");
        ready
    }

    /// Release every texture (reload or shutdown).
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        let images = self.images.drain().filter_map(|(_, t)| t);
        let gradients = self.gradients.drain().map(|(_, t)| t);
        let tiles = self.tiles.drain().map(|(_, t)| t);
        for tex in images.chain(gradients).chain(tiles) {
            if let Err(e) = backend.destroy_texture(tex.id) {
                log::debug!("destroy_texture({:?}): {e}", tex.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, gradient_for};
    use crate::test_utils::MockBackend;

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn decodes_and_caches_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        write_png(&path, 4, 3);
        let mut backend = MockBackend::new();
        let mut cache = TextureCache::new();

        let tex = cache.image(&path, &mut backend).unwrap();
        assert_eq!((tex.width, tex.height), (4, 3));
        assert_eq!(cache.image(&path, &mut backend), Some(tex));
        assert_eq!(backend.textures.len(), 1);
    }

    #[test]
    fn corrupt_image_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        let mut backend = MockBackend::new();
        let mut cache = TextureCache::new();
        assert_eq!(cache.image(&path, &mut backend), None);
        // Fixing the file on disk does not retry within this cache.
        write_png(&path, 1, 1);
        assert_eq!(cache.image(&path, &mut backend), None);
        assert!(backend.textures.is_empty());
    }

    #[test]
    fn upload_failure_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.png");
        write_png(&path, 2, 2);
        let mut backend = MockBackend::new();
        backend.refuse_textures = true;
        let mut cache = TextureCache::new();
        assert_eq!(cache.image(&path, &mut backend), None);
        assert_eq!(cache.gradient(gradient_for(0), &mut backend), None);
    }

    #[test]
    fn gradients_are_cached_per_palette_entry() {
        let mut backend = MockBackend::new();
        let mut cache = TextureCache::new();
        let a = cache.gradient(gradient_for(0), &mut backend).unwrap();
        let b = cache.gradient(gradient_for(5), &mut backend).unwrap();
        let c = cache.gradient(gradient_for(1), &mut backend).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.id, c.id);
        assert_eq!(backend.textures.len(), 2);
    }

    #[test]
    fn tile_corners_are_transparent() {
        let color = Color::rgba(255, 255, 255, 28);
        let px = rounded_tile_rgba(16, 4, color);
        let alpha = |x: usize, y: usize| px[(y * 16 + x) * 4 + 3];
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(15, 15), 0);
        assert_eq!(alpha(8, 8), 28);
        assert_eq!(alpha(8, 0), 28);
        assert_eq!(alpha(0, 8), 28);
    }

    #[test]
    fn tiles_are_cached_per_color() {
        let mut backend = MockBackend::new();
        let mut cache = TextureCache::new();
        let white = Color::rgba(255, 255, 255, 28);
        let a = cache.tile(white, 14, &mut backend).unwrap();
        assert_eq!(cache.tile(white, 14, &mut backend), Some(a));
        cache.tile(white.with_alpha(56), 14, &mut backend).unwrap();
        assert_eq!(backend.textures.len(), 2);

        cache.clear(&mut backend);
        assert_eq!(backend.destroyed.len(), 2);
    }

    #[test]
    fn preload_counts_ready_images() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        write_png(&logo, 8, 8);
        let entries = vec![
            AppEntry {
                id: "a".into(),
                name: "A".into(),
                path: "/bin/a".into(),
                logo: Some(logo),
                background: Some(dir.path().join("missing.jpg")),
                bg_gradient: gradient_for(0),
                kind: EntryKind::Descriptor,
            },
            AppEntry::placeholder(crate::entry::PlaceholderKind::NoApps, "No Apps Found"),
        ];
        let mut backend = MockBackend::new();
        let mut cache = TextureCache::new();
        assert_eq!(cache.preload(&entries, &mut backend), 1);

        cache.clear(&mut backend);
        assert_eq!(backend.destroyed.len(), 2);
    }
}
