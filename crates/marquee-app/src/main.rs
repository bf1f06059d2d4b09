//! Marquee entry point.
//!
//! Full-screen carousel of external applications discovered from
//! descriptor files under `<base>/apps`. Left/Right (or stick / D-pad)
//! turns the wheel, Enter (or A) launches, Tab toggles the UI language,
//! Escape quits.
//!
//! Usage: `marquee [BASE_DIR]`

mod app_state;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use app_state::AppState;
use marquee_backend_sdl::{SdlBackend, WindowOptions};
use marquee_core::backend::{AudioBackend, InputBackend, RenderBackend};
use marquee_core::config::LauncherConfig;
use marquee_core::loader::load_entries;
use marquee_core::platform::{DesktopClock, DesktopHost, HostService};
use marquee_core::prefs::Preferences;
use marquee_core::render::draw_scene;
use marquee_core::sound::{Sfx, SoundBank};
use marquee_core::textures::TextureCache;
use marquee_core::Launcher;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = DesktopHost::new(std::env::args_os().nth(1).map(PathBuf::from));
    let base = host.base_path();

    let config = LauncherConfig::load(&base).unwrap_or_else(|e| {
        log::error!("{e}; continuing with defaults");
        LauncherConfig::default()
    });
    log::info!(
        "Starting {} ({}x{}{})",
        config.window_title,
        config.screen_width,
        config.screen_height,
        if config.fullscreen { ", fullscreen" } else { "" },
    );

    let prefs_path = Preferences::default_path();
    let prefs = prefs_path
        .as_deref()
        .map(Preferences::load)
        .unwrap_or_default();
    let language = prefs.language();

    // Entries must be loaded before the first frame is drawn.
    let entries = load_entries(&base, &config.apps_dir, language.strings());

    let mut backend = SdlBackend::new(&WindowOptions {
        title: &config.window_title,
        width: config.screen_width,
        height: config.screen_height,
        fullscreen: config.fullscreen,
        font_path: config.font_path.as_deref(),
    })?;
    backend.init(config.screen_width, config.screen_height)?;

    let audio: Option<Box<dyn AudioBackend>> = if config.audio.enabled {
        match backend.open_audio() {
            Ok(audio) => Some(Box::new(audio)),
            Err(e) => {
                log::warn!("Sound disabled: {e}");
                None
            },
        }
    } else {
        None
    };

    let mut textures = TextureCache::new();
    textures.preload(&entries, &mut backend);

    let mut launcher = Launcher::new(
        entries,
        &config,
        language,
        Box::new(DesktopClock::new()),
        Instant::now(),
    );

    let mut state = AppState {
        host,
        audio,
        sounds: SoundBank::new(config.audio.enabled, config.audio.volume),
        prefs,
        prefs_path,
    };
    if let Some(audio) = state.audio.as_deref_mut() {
        state.sounds.play(Sfx::WarmUp, audio);
    }

    loop {
        let now = Instant::now();
        let (w, h) = backend.viewport();
        launcher.set_viewport(w, h);

        for event in backend.poll_events() {
            launcher.handle_event(&event, now);
        }
        let pad = backend.gamepad();
        launcher.poll_gamepad(pad.as_ref(), now);

        launcher.frame(now);
        state.apply(launcher.take_effects());
        if state.host.quit_requested() {
            break;
        }

        let scene = launcher.scene(now);
        if let Err(e) = draw_scene(&scene, &mut backend, &mut textures) {
            log::warn!("Frame incomplete: {e}");
        }
        backend.swap_buffers()?;
    }

    textures.clear(&mut backend);
    backend.shutdown()?;
    log::info!("Bye");
    Ok(())
}
