//! Shared test utilities for marquee-core tests.
//!
//! Provides a [`MockBackend`] that records all draw calls for assertion.

use crate::backend::{Color, RenderBackend, TextureId};
use crate::error::{MarqueeError, Result};

/// A recorded draw call from the mock backend.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawCall {
    Clear {
        color: Color,
    },
    FillRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    DrawText {
        text: String,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    },
    Blit {
        tex: TextureId,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        angle: f32,
        alpha: u8,
    },
    Present,
}

/// A mock backend that records all draw calls for test assertions.
pub struct MockBackend {
    pub calls: Vec<DrawCall>,
    pub viewport: (u32, u32),
    /// Uploaded textures by id, as `(width, height)`.
    pub textures: Vec<(TextureId, u32, u32)>,
    pub destroyed: Vec<TextureId>,
    /// When set, `load_texture` fails.
    pub refuse_textures: bool,
    next_texture: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            viewport: (1280, 720),
            textures: Vec::new(),
            destroyed: Vec::new(),
            refuse_textures: false,
            next_texture: 1,
        }
    }

    /// Count of `FillRect` calls.
    pub fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
            .count()
    }

    /// Return only the `Blit` entries.
    pub fn blits(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Blit { .. }))
            .collect()
    }

    /// Texts drawn, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if any `DrawText` call contains the given substring.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl RenderBackend for MockBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = (width, height);
        Ok(())
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Clear { color });
        Ok(())
    }

    fn blit(&mut self, tex: TextureId, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        self.blit_ex(tex, x, y, w, h, 0.0, 255)
    }

    fn blit_ex(
        &mut self,
        tex: TextureId,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        angle_deg: f32,
        alpha: u8,
    ) -> Result<()> {
        self.calls.push(DrawCall::Blit {
            tex,
            x,
            y,
            w,
            h,
            angle: angle_deg,
            alpha,
        });
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size: u16) -> u32 {
        text.chars().count() as u32 * (font_size as u32 / 2)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }

    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId> {
        if self.refuse_textures {
            return Err(MarqueeError::Backend("texture upload refused".into()));
        }
        assert_eq!(rgba_data.len(), (width * height * 4) as usize);
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.push((id, width, height));
        Ok(id)
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        self.destroyed.push(tex);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
