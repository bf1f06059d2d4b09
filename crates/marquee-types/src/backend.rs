//! Backend trait definitions.
//!
//! Every platform implements these traits. The launcher core dispatches all
//! drawing, input and audio through trait boundaries -- it never calls
//! platform-specific APIs.

use crate::error::Result;
use crate::input::{GamepadState, InputEvent};

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Linear interpolation, `t` in `[0.0, 1.0]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

/// Opaque handle to a loaded texture in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Rendering backend trait.
///
/// The core methods are required. `fill_rounded_rect`, `blit_ex` and
/// `measure_text_height` have default implementations that approximate with
/// the core methods, so a minimal backend still draws a usable wheel.
pub trait RenderBackend {
    /// Initialize the rendering subsystem.
    fn init(&mut self, width: u32, height: u32) -> Result<()>;

    /// Current drawable size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Clear the screen to a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Blit a texture at the given position and size.
    fn blit(&mut self, tex: TextureId, x: i32, y: i32, w: u32, h: u32) -> Result<()>;

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()>;

    /// Draw text with its top-left corner at the given position.
    /// `font_size` is a hint in pixels; backends may approximate.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: u16, color: Color)
    -> Result<()>;

    /// Measure the width of a text string at the given font size.
    fn measure_text(&self, text: &str, font_size: u16) -> u32;

    /// Present the current frame to the display.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Load raw RGBA pixel data as a texture. Returns a handle for later blit.
    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId>;

    /// Destroy a previously loaded texture.
    fn destroy_texture(&mut self, tex: TextureId) -> Result<()>;

    /// Shut down the rendering subsystem and release resources.
    fn shutdown(&mut self) -> Result<()>;

    /// Draw a filled rectangle with rounded corners.
    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        _radius: u16,
        color: Color,
    ) -> Result<()> {
        self.fill_rect(x, y, w, h, color)
    }

    /// Blit a texture rotated by `angle_deg` (clockwise, about its centre)
    /// with the given opacity (0 = invisible, 255 = opaque).
    fn blit_ex(
        &mut self,
        tex: TextureId,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        _angle_deg: f32,
        _alpha: u8,
    ) -> Result<()> {
        self.blit(tex, x, y, w, h)
    }

    /// Height of a line of text at the given font size.
    fn measure_text_height(&self, font_size: u16) -> u32 {
        (font_size as f32 * 1.2) as u32
    }
}

/// Input backend trait.
pub trait InputBackend {
    /// Poll for pending input events.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Sample the first connected game controller, or `None` when no
    /// controller is attached.
    fn gamepad(&self) -> Option<GamepadState>;
}

/// Sound-effect playback backend.
///
/// Playback is best-effort: callers log failures and carry on.
pub trait AudioBackend {
    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Play a mono `f32` buffer, interrupting whatever is queued.
    fn play_samples(&mut self, samples: &[f32]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_channels() {
        let c = Color::hex(0x0d2538);
        assert_eq!(c, Color::rgb(0x0d, 0x25, 0x38));
        assert_eq!(c.a, 255);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::rgb(1, 2, 3).with_alpha(9);
        assert_eq!(c, Color::rgba(1, 2, 3, 9));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 4.0), Color::WHITE);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, -1.0), Color::BLACK);
    }
}
