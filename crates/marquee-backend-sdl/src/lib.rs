//! SDL2 backend for Marquee.
//!
//! Implements `RenderBackend` and `InputBackend` using SDL2, plus an audio
//! queue for sound effects. Used on desktops and on the Raspberry Pi (via
//! SDL2's kmsdrm or X11 video driver).
//!
//! Text is rendered with SDL_ttf so non-ASCII UI strings display
//! correctly. Rendered strings are cached as textures; the wheel redraws
//! the same handful of labels every frame.

mod audio;
mod font;

use std::collections::HashMap;
use std::path::Path;

use sdl2::controller::{Axis, Button as PadButton, GameController};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::{EventPump, GameControllerSubsystem, Sdl};

use marquee_types::backend::{Color, InputBackend, RenderBackend, TextureId};
use marquee_types::error::{MarqueeError, Result};
use marquee_types::input::{Button, GamepadState, InputEvent};

pub use audio::SdlAudio;
pub use font::{FONT_ENV, discover_font};

use font::FontCache;

/// Cached text textures beyond this count are flushed.
const TEXT_CACHE_LIMIT: usize = 256;

fn backend_err(e: impl ToString) -> MarqueeError {
    MarqueeError::Backend(e.to_string())
}

fn sdl_color(c: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(c.r, c.g, c.b, c.a)
}

/// Window settings for [`SdlBackend::new`].
#[derive(Debug, Clone)]
pub struct WindowOptions<'a> {
    pub title: &'a str,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub font_path: Option<&'a Path>,
}

struct TextTexture {
    texture: Texture<'static>,
    width: u32,
    height: u32,
}

/// SDL2 rendering and input backend.
///
/// # Safety
///
/// `text_cache` and `textures` are declared before `texture_creator` so
/// that Rust's drop order (declaration order) destroys all textures before
/// the creator they borrow from. The `Texture<'static>` lifetime is erased
/// via transmute in [`SdlBackend::erase`]; this is sound because the
/// `TextureCreator` always outlives the textures.
pub struct SdlBackend {
    text_cache: HashMap<(String, u16, Color), TextTexture>,
    textures: HashMap<u64, Texture<'static>>,
    texture_creator: TextureCreator<WindowContext>,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    controller_subsystem: Option<GameControllerSubsystem>,
    pads: Vec<GameController>,
    fonts: FontCache,
    next_texture_id: u64,
    sdl: Sdl,
}

impl SdlBackend {
    /// Create the window, renderer, event pump and controller subsystem.
    pub fn new(options: &WindowOptions<'_>) -> Result<Self> {
        let sdl = sdl2::init().map_err(backend_err)?;
        let video = sdl.video().map_err(backend_err)?;
        let mut builder = video.window(options.title, options.width, options.height);
        builder.position_centered();
        if options.fullscreen {
            builder.fullscreen_desktop().borderless();
        }
        let window = builder.build().map_err(backend_err)?;
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(backend_err)?;
        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl.event_pump().map_err(backend_err)?;

        let controller_subsystem = match sdl.game_controller() {
            Ok(subsystem) => Some(subsystem),
            Err(e) => {
                log::warn!("Game controller support unavailable: {e}");
                None
            },
        };

        if options.fullscreen {
            sdl.mouse().show_cursor(false);
        }

        let (w, h) = canvas.output_size().map_err(backend_err)?;
        log::info!(
            "SDL2 backend initialized: {w}x{h}{}",
            if options.fullscreen { " (fullscreen)" } else { "" }
        );

        let mut backend = Self {
            text_cache: HashMap::new(),
            textures: HashMap::new(),
            texture_creator,
            canvas,
            event_pump,
            controller_subsystem,
            pads: Vec::new(),
            fonts: FontCache::new(options.font_path),
            next_texture_id: 1,
            sdl,
        };
        backend.open_attached_controllers();
        Ok(backend)
    }

    /// Open the audio output. Callers treat failure as "no sound".
    pub fn open_audio(&self) -> Result<SdlAudio> {
        let subsystem = self.sdl.audio().map_err(MarqueeError::Audio)?;
        SdlAudio::open(&subsystem)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.canvas.window().fullscreen_state() != FullscreenType::Off
    }

    /// Erase a texture's borrow of `texture_creator`.
    fn erase(texture: Texture<'_>) -> Texture<'static> {
        // SAFETY: The texture borrows from self.texture_creator which lives in
        // the same struct. Both texture maps are declared before
        // `texture_creator`, so Rust drops them first.
        unsafe { std::mem::transmute::<Texture<'_>, Texture<'static>>(texture) }
    }

    // -- controllers --------------------------------------------------------

    fn open_attached_controllers(&mut self) {
        let Some(subsystem) = &self.controller_subsystem else {
            return;
        };
        let count = match subsystem.num_joysticks() {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Cannot enumerate joysticks: {e}");
                return;
            },
        };
        for index in 0..count {
            self.open_controller(index);
        }
    }

    /// Open the controller at device `index`. Returns `true` when a new
    /// controller was added.
    fn open_controller(&mut self, index: u32) -> bool {
        let Some(subsystem) = &self.controller_subsystem else {
            return false;
        };
        if !subsystem.is_game_controller(index) {
            return false;
        }
        match subsystem.open(index) {
            Ok(pad) => {
                if self.pads.iter().any(|p| p.instance_id() == pad.instance_id()) {
                    return false;
                }
                log::info!("Opened controller: {}", pad.name());
                self.pads.push(pad);
                true
            },
            Err(e) => {
                log::warn!("Failed opening controller {index}: {e}");
                false
            },
        }
    }

    fn close_controller(&mut self, instance_id: u32) -> bool {
        let before = self.pads.len();
        self.pads.retain(|p| p.instance_id() != instance_id);
        before != self.pads.len()
    }

    fn map_event(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Quit { .. } => Some(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(key),
                repeat,
                ..
            } => map_key_down(key, repeat),
            Event::KeyUp {
                keycode: Some(key), ..
            } => map_key_up(key),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => Some(InputEvent::PointerClick { x, y }),
            Event::FingerDown { x, y, .. } => {
                let (w, h) = self.viewport();
                Some(InputEvent::PointerClick {
                    x: (x * w as f32) as i32,
                    y: (y * h as f32) as i32,
                })
            },
            Event::ControllerDeviceAdded { which, .. } => {
                self.open_controller(which).then_some(InputEvent::GamepadConnected)
            },
            Event::ControllerDeviceRemoved { which, .. } => {
                self.close_controller(which).then_some(InputEvent::GamepadDisconnected)
            },
            _ => None,
        }
    }

    // -- text ---------------------------------------------------------------

    /// Make sure a texture for `key` is cached. Returns `false` when the
    /// text cannot be rendered (no font, or SDL_ttf failure).
    fn ensure_text(&mut self, key: &(String, u16, Color)) -> bool {
        if self.text_cache.contains_key(key) {
            return true;
        }
        if self.text_cache.len() >= TEXT_CACHE_LIMIT {
            self.text_cache.clear();
        }
        let (text, size, color) = key;
        let Some(rendered) = self
            .fonts
            .with_font(*size, |font| font.render(text).blended(sdl_color(*color)))
        else {
            return false;
        };
        let surface = match rendered {
            Ok(surface) => surface,
            Err(e) => {
                log::debug!("Text render failed for {text:?}: {e}");
                return false;
            },
        };
        let texture = match self.texture_creator.create_texture_from_surface(&surface) {
            Ok(texture) => texture,
            Err(e) => {
                log::debug!("Text upload failed: {e}");
                return false;
            },
        };
        self.text_cache.insert(
            key.clone(),
            TextTexture {
                width: surface.width(),
                height: surface.height(),
                texture: Self::erase(texture),
            },
        );
        true
    }

    fn set_color(&mut self, color: Color) {
        self.canvas.set_blend_mode(if color.a < 255 {
            BlendMode::Blend
        } else {
            BlendMode::None
        });
        self.canvas.set_draw_color(sdl_color(color));
    }
}

impl RenderBackend for SdlBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<()> {
        if !self.is_fullscreen() {
            self.canvas
                .window_mut()
                .set_size(width, height)
                .map_err(backend_err)?;
        }
        Ok(())
    }

    fn viewport(&self) -> (u32, u32) {
        self.canvas
            .output_size()
            .unwrap_or_else(|_| self.canvas.window().size())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
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
        if w == 0 || h == 0 || alpha == 0 {
            return Ok(());
        }
        let texture = self
            .textures
            .get_mut(&tex.0)
            .ok_or_else(|| MarqueeError::Backend(format!("texture not found: {}", tex.0)))?;
        texture.set_alpha_mod(alpha);
        self.canvas
            .copy_ex(
                texture,
                None,
                Rect::new(x, y, w, h),
                angle_deg as f64,
                None,
                false,
                false,
            )
            .map_err(backend_err)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.set_color(color);
        self.canvas
            .fill_rect(Rect::new(x, y, w, h))
            .map_err(backend_err)
    }

    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        radius: u16,
        color: Color,
    ) -> Result<()> {
        if radius == 0 || w == 0 || h == 0 {
            return self.fill_rect(x, y, w, h, color);
        }
        let r = (radius as u32).min(w / 2).min(h / 2) as i32;
        self.set_color(color);

        // Body between the corner rows.
        if h as i32 > 2 * r {
            self.canvas
                .fill_rect(Rect::new(x, y + r, w, h - 2 * r as u32))
                .map_err(backend_err)?;
        }
        // Corner rows: each scanline inset by the circle's horizontal extent.
        for row in 0..r {
            let dy = r - row;
            let inset = r - isqrt(r * r - dy * dy);
            let span_w = w as i32 - 2 * inset;
            if span_w <= 0 {
                continue;
            }
            let top = Point::new(x + inset, y + row);
            let bottom = Point::new(x + inset, y + h as i32 - 1 - row);
            for start in [top, bottom] {
                self.canvas
                    .draw_line(start, Point::new(start.x() + span_w - 1, start.y()))
                    .map_err(backend_err)?;
            }
        }
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
        if text.is_empty() || color.a == 0 {
            return Ok(());
        }
        // Alpha is applied as a texture modulation so one cached texture
        // serves every fade step.
        let key = (text.to_string(), font_size, color.with_alpha(255));
        if !self.ensure_text(&key) {
            return Ok(());
        }
        let Some(cached) = self.text_cache.get_mut(&key) else {
            return Ok(());
        };
        cached.texture.set_alpha_mod(color.a);
        self.canvas
            .copy(
                &cached.texture,
                None,
                Rect::new(x, y, cached.width, cached.height),
            )
            .map_err(backend_err)
    }

    fn measure_text(&self, text: &str, font_size: u16) -> u32 {
        self.fonts
            .with_font(font_size, |font| font.size_of(text).map(|(w, _)| w).ok())
            .flatten()
            .unwrap_or_else(|| text.chars().count() as u32 * font_size as u32 / 2)
    }

    fn measure_text_height(&self, font_size: u16) -> u32 {
        self.fonts
            .with_font(font_size, |font| font.height().max(0) as u32)
            .unwrap_or((font_size as f32 * 1.2) as u32)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId> {
        let expected = (width * height * 4) as usize;
        if rgba_data.len() != expected {
            return Err(MarqueeError::Backend(format!(
                "texture data size mismatch: expected {expected}, got {}",
                rgba_data.len()
            )));
        }

        let mut texture = self
            .texture_creator
            .create_texture_static(PixelFormatEnum::ABGR8888, width, height)
            .map_err(backend_err)?;
        texture
            .update(None, rgba_data, (width * 4) as usize)
            .map_err(backend_err)?;
        texture.set_blend_mode(BlendMode::Blend);

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.textures.insert(id, Self::erase(texture));
        Ok(TextureId(id))
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        self.textures.remove(&tex.0);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.text_cache.clear();
        self.textures.clear();
        self.pads.clear();
        log::info!("SDL2 backend shut down");
        Ok(())
    }
}

impl InputBackend for SdlBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        events
            .into_iter()
            .filter_map(|event| self.map_event(event))
            .collect()
    }

    fn gamepad(&self) -> Option<GamepadState> {
        let pad = self.pads.first()?;
        Some(GamepadState {
            axis_x: GamepadState::normalize_axis(pad.axis(Axis::LeftX)),
            dpad_left: pad.button(PadButton::DPadLeft),
            dpad_right: pad.button(PadButton::DPadRight),
            primary: pad.button(PadButton::A),
        })
    }
}

fn map_key_down(key: Keycode, repeat: bool) -> Option<InputEvent> {
    let button = match key {
        Keycode::Up => Button::Up,
        Keycode::Down => Button::Down,
        Keycode::Left => Button::Left,
        Keycode::Right => Button::Right,
        Keycode::Return | Keycode::KpEnter => Button::Confirm,
        Keycode::Escape => Button::Cancel,
        // Auto-repeat is fine for navigation but would relaunch or toggle.
        Keycode::Tab if !repeat => Button::Select,
        _ => return None,
    };
    if repeat && matches!(button, Button::Confirm | Button::Cancel) {
        return None;
    }
    Some(InputEvent::ButtonPress(button))
}

fn map_key_up(key: Keycode) -> Option<InputEvent> {
    let button = match key {
        Keycode::Up => Button::Up,
        Keycode::Down => Button::Down,
        Keycode::Left => Button::Left,
        Keycode::Right => Button::Right,
        Keycode::Return | Keycode::KpEnter => Button::Confirm,
        Keycode::Escape => Button::Cancel,
        Keycode::Tab => Button::Select,
        _ => return None,
    };
    Some(InputEvent::ButtonRelease(button))
}

/// Integer square root (floor).
fn isqrt(n: i32) -> i32 {
    if n <= 0 {
        return 0;
    }
    let mut x = (n as f32).sqrt() as i32;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}
