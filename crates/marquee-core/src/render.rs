//! Scene drawing.
//!
//! All drawing goes through [`RenderBackend`] primitives. Missing images
//! degrade to the entry gradient (backgrounds) or to a tile with the
//! entry's initial (logos); nothing here blocks on I/O beyond the first
//! decode of each path.

use crate::backend::{Color, RenderBackend};
use crate::crossfade::{Fill, Layer};
use crate::error::Result;
use crate::scene::{
    BUTTON_FONT_SIZE, CLOCK_FONT_SIZE, GLYPH_FONT_SIZE, Rect, Scene, SceneItem, TITLE_FONT_SIZE,
    TITLE_RATIO,
};
use crate::textures::{TILE_TEXTURE_SIZE, Texture, TextureCache};
use crate::wheel::TILE_BASE_SIZE;

const TILE_COLOR: Color = Color::rgba(255, 255, 255, 28);
const TILE_ACTIVE_COLOR: Color = Color::rgba(255, 255, 255, 56);
const BUTTON_COLOR: Color = Color::rgba(255, 255, 255, 36);
const TEXT_COLOR: Color = Color::WHITE;
const TILE_RADIUS: u16 = 18;

fn alpha_u8(a: f32) -> u8 {
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Draw one full frame (without presenting).
pub fn draw_scene(
    scene: &Scene,
    backend: &mut dyn RenderBackend,
    cache: &mut TextureCache,
) -> Result<()> {
    backend.clear(Color::BLACK)?;
    for layer in &scene.background {
        draw_background(layer, scene.viewport, backend, cache)?;
    }
    for item in &scene.items {
        draw_item(item, backend, cache)?;
    }
    draw_title(scene, backend)?;
    draw_chrome(scene, backend)?;
    Ok(())
}

/// Scale `(w, h)` to cover `(vw, vh)`, centred. May overflow the viewport.
pub fn cover_fit(w: u32, h: u32, vw: u32, vh: u32) -> (i32, i32, u32, u32) {
    if w == 0 || h == 0 {
        return (0, 0, vw, vh);
    }
    let scale = (vw as f32 / w as f32).max(vh as f32 / h as f32);
    let (dw, dh) = ((w as f32 * scale).round(), (h as f32 * scale).round());
    (
        ((vw as f32 - dw) / 2.0).round() as i32,
        ((vh as f32 - dh) / 2.0).round() as i32,
        dw as u32,
        dh as u32,
    )
}

/// Scale `(w, h)` to fit inside a `box_size` square, preserving aspect.
pub fn contain_fit(w: u32, h: u32, box_size: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (box_size, box_size);
    }
    let scale = (box_size as f32 / w as f32).min(box_size as f32 / h as f32);
    (
        (w as f32 * scale).round() as u32,
        (h as f32 * scale).round() as u32,
    )
}

fn draw_background(
    layer: &Layer,
    (vw, vh): (u32, u32),
    backend: &mut dyn RenderBackend,
    cache: &mut TextureCache,
) -> Result<()> {
    let image = match &layer.fill {
        Fill::Image(path) => cache.image(path, backend),
        Fill::Gradient(_) => None,
    };
    let alpha = alpha_u8(layer.alpha);
    match image {
        Some(Texture { id, width, height }) => {
            let (x, y, w, h) = cover_fit(width, height, vw, vh);
            backend.blit_ex(id, x, y, w, h, 0.0, alpha)
        },
        None => {
            let gradient = match &layer.fill {
                Fill::Gradient(g) => *g,
                Fill::Image(_) => layer.fallback,
            };
            match cache.gradient(gradient, backend) {
                Some(tex) => backend.blit_ex(tex.id, 0, 0, vw, vh, 0.0, alpha),
                None => backend.fill_rect(0, 0, vw, vh, gradient.from.with_alpha(alpha)),
            }
        },
    }
}

fn draw_item(
    item: &SceneItem,
    backend: &mut dyn RenderBackend,
    cache: &mut TextureCache,
) -> Result<()> {
    if item.opacity <= 0.0 {
        return Ok(());
    }
    let alpha = alpha_u8(item.opacity);
    let (x, y, size) = item.rect.pixel_bounds();
    if size == 0 {
        return Ok(());
    }

    let logo = item
        .logo
        .as_deref()
        .and_then(|p| cache.image(p, backend));
    if let Some(tex) = logo {
        let (w, h) = contain_fit(tex.width, tex.height, size);
        let lx = x + (size as i32 - w as i32) / 2;
        let ly = y + (size as i32 - h as i32) / 2;
        return backend.blit_ex(tex.id, lx, ly, w, h, item.rect.rotation, alpha);
    }

    let base = if item.active { TILE_ACTIVE_COLOR } else { TILE_COLOR };
    let radius = (TILE_RADIUS as f32 * TILE_TEXTURE_SIZE as f32 / TILE_BASE_SIZE).round() as u32;
    match cache.tile(base, radius, backend) {
        Some(tile) => backend.blit_ex(tile.id, x, y, size, size, item.rect.rotation, alpha)?,
        None => {
            let tile_alpha = (base.a as f32 * item.opacity).round() as u8;
            backend.fill_rounded_rect(x, y, size, size, TILE_RADIUS, base.with_alpha(tile_alpha))?;
        },
    }

    // The glyph stays upright, centred on the rotated tile.

    let glyph_size = ((GLYPH_FONT_SIZE as f32) * item.rect.size / 160.0).max(8.0) as u16;
    let gw = backend.measure_text(&item.initial, glyph_size) as i32;
    let gh = backend.measure_text_height(glyph_size) as i32;
    backend.draw_text(
        &item.initial,
        x + (size as i32 - gw) / 2,
        y + (size as i32 - gh) / 2,
        glyph_size,
        TEXT_COLOR.with_alpha(alpha),
    )
}

fn draw_title(scene: &Scene, backend: &mut dyn RenderBackend) -> Result<()> {
    let title = &scene.title;
    if title.text.is_empty() || title.opacity <= 0.0 {
        return Ok(());
    }
    let (vw, vh) = scene.viewport;
    let w = backend.measure_text(&title.text, TITLE_FONT_SIZE) as i32;
    let y = (vh as f32 * TITLE_RATIO + title.offset_y).round() as i32;
    backend.draw_text(
        &title.text,
        (vw as i32 - w) / 2,
        y,
        TITLE_FONT_SIZE,
        TEXT_COLOR.with_alpha(alpha_u8(title.opacity)),
    )
}

fn draw_button(rect: Rect, label: &str, backend: &mut dyn RenderBackend) -> Result<()> {
    backend.fill_rounded_rect(rect.x, rect.y, rect.w, rect.h, (rect.h / 2) as u16, BUTTON_COLOR)?;
    let w = backend.measure_text(label, BUTTON_FONT_SIZE) as i32;
    let h = backend.measure_text_height(BUTTON_FONT_SIZE) as i32;
    backend.draw_text(
        label,
        rect.x + (rect.w as i32 - w) / 2,
        rect.y + (rect.h as i32 - h) / 2,
        BUTTON_FONT_SIZE,
        TEXT_COLOR,
    )
}

fn draw_chrome(scene: &Scene, backend: &mut dyn RenderBackend) -> Result<()> {
    if !scene.clock.is_empty() {
        let (x, y) = scene.chrome.clock_origin;
        backend.draw_text(&scene.clock, x, y, CLOCK_FONT_SIZE, TEXT_COLOR)?;
    }
    draw_button(scene.chrome.language_button, &scene.language_label, backend)?;
    draw_button(scene.chrome.exit_button, "X", backend)
}
