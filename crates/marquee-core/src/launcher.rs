//! The launcher facade: all navigation state behind one frame-driven API.
//!
//! Input handlers only mutate state and request a recompute; the actual
//! recompute runs at most once per displayed frame in [`Launcher::frame`].
//! Side effects the core cannot perform itself (spawning, quitting, sound,
//! persistence) are queued as [`Effect`]s for the binary to apply.

use std::time::{Duration, Instant};

use crate::animation::{Tween, easing};
use crate::carousel::{CarouselState, RedrawGuard};
use crate::clock::ClockDisplay;
use crate::config::LauncherConfig;
use crate::crossfade::BackgroundCrossfade;
use crate::dispatch::{Action, GamepadPoller, action_for_event};
use crate::entry::{AppEntry, PlaceholderKind};
use crate::i18n::Language;
use crate::input::{GamepadState, InputEvent};
use crate::launch::LaunchCoordinator;
use crate::platform::TimeService;
use crate::scene::{Chrome, Scene, SceneItem, TITLE_SLIDE_PX, TitleView};
use crate::sound::Sfx;
use crate::wheel::{WheelAnimator, WheelGeometry};

/// Work for the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Spawn the program at this path.
    Launch(String),
    Quit,
    Play(Sfx),
    /// Store the chosen language.
    PersistLanguage(Language),
}

#[derive(Debug, Default)]
struct Title {
    text: String,
    slide: Option<Tween>,
}

pub struct Launcher {
    carousel: CarouselState,
    redraw: RedrawGuard,
    wheel: WheelAnimator,
    geometry: WheelGeometry,
    background: BackgroundCrossfade,
    gamepad: GamepadPoller,
    launch: LaunchCoordinator,
    clock: ClockDisplay,
    language: Language,
    title: Title,
    title_slide: Duration,
    effects: Vec<Effect>,
}

impl Launcher {
    pub fn new(
        entries: Vec<AppEntry>,
        config: &LauncherConfig,
        language: Language,
        time: Box<dyn TimeService>,
        now: Instant,
    ) -> Self {
        let timing = &config.timing;
        let mut launcher = Self {
            carousel: CarouselState::new(entries),
            redraw: RedrawGuard::new(),
            wheel: WheelAnimator::new(timing.item_transition()),
            geometry: WheelGeometry::new(config.screen_width, config.screen_height),
            background: BackgroundCrossfade::new(timing.background_debounce(), timing.crossfade()),
            gamepad: GamepadPoller::new(&config.gamepad),
            launch: LaunchCoordinator::new(timing.launch_status()),
            clock: ClockDisplay::new(time, now, timing.clock_interval()),
            language,
            title: Title::default(),
            title_slide: timing.title_slide(),
            effects: Vec::new(),
        };
        launcher.redraw.request();
        log::info!(
            "Launcher ready with {} entries ({})",
            launcher.carousel.len(),
            language.code()
        );
        launcher
    }

    // -- accessors ----------------------------------------------------------

    pub fn entries(&self) -> &[AppEntry] {
        self.carousel.entries()
    }

    pub fn current(&self) -> usize {
        self.carousel.current()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn title(&self) -> &str {
        &self.title.text
    }

    pub fn background(&self) -> &BackgroundCrossfade {
        &self.background
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.geometry = WheelGeometry::new(width, height);
    }

    /// Drain queued side effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // -- input --------------------------------------------------------------

    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) {
        match event {
            InputEvent::Quit => self.effects.push(Effect::Quit),
            InputEvent::PointerClick { x, y } => self.click(*x, *y, now),
            InputEvent::GamepadConnected => log::info!("Gamepad connected"),
            InputEvent::GamepadDisconnected => log::info!("Gamepad disconnected"),
            other => {
                if let Some(action) = action_for_event(other) {
                    self.dispatch(action, now);
                }
            },
        }
    }

    pub fn poll_gamepad(&mut self, state: Option<&GamepadState>, now: Instant) {
        for action in self.gamepad.poll(now, state) {
            self.dispatch(action, now);
        }
    }

    fn click(&mut self, x: i32, y: i32, now: Instant) {
        let chrome = Chrome::for_viewport(self.geometry.width, self.geometry.height);
        if chrome.exit_button.contains(x, y) {
            self.effects.push(Effect::Play(Sfx::Select));
            self.dispatch(Action::Exit, now);
        } else if chrome.language_button.contains(x, y) {
            self.dispatch(Action::ToggleLanguage, now);
        } else if let Some(index) = self.geometry.hit_test(&self.wheel.layouts(now), x, y) {
            self.dispatch(Action::Select(index), now);
        }
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        log::trace!("dispatch {action:?}");
        match action {
            Action::MoveLeft => {
                self.carousel.move_left();
                self.moved(true);
            },
            Action::MoveRight => {
                self.carousel.move_right();
                self.moved(true);
            },
            Action::Select(index) => {
                if self.carousel.select(index) {
                    self.moved(false);
                }
            },
            Action::Confirm => {
                let Some(entry) = self.carousel.current_entry() else {
                    return;
                };
                if let Some(request) = self.launch.confirm(now, entry) {
                    self.effects.push(Effect::Play(Sfx::Select));
                    self.effects.push(Effect::Launch(request.path));
                }
            },
            Action::Exit => {
                log::info!("Exit requested");
                self.effects.push(Effect::Quit);
            },
            Action::ToggleLanguage => self.toggle_language(),
        }
    }

    fn moved(&mut self, with_sound: bool) {
        self.launch.cancel();
        if with_sound {
            self.effects.push(Effect::Play(Sfx::Move));
        }
        self.redraw.request();
    }

    fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        let strings = self.language.strings();
        let renamed = self.carousel.refresh_placeholder_name(|entry| {
            entry.placeholder_kind().map(|kind| {
                match kind {
                    PlaceholderKind::FolderMissing => strings.apps_folder_not_found,
                    PlaceholderKind::NoApps => strings.no_apps_found,
                }
                .to_string()
            })
        });
        if renamed {
            self.redraw.request();
        }
        log::info!("Language -> {}", self.language.code());
        self.effects.push(Effect::Play(Sfx::Select));
        self.effects.push(Effect::PersistLanguage(self.language));
    }

    /// Swap in a freshly loaded entry list.
    pub fn reload(&mut self, entries: Vec<AppEntry>) {
        self.carousel.replace_entries(entries);
        self.launch.cancel();
        self.redraw.request();
    }

    // -- frame --------------------------------------------------------------

    /// Advance timers and run the coalesced recompute. Call once per
    /// display refresh.
    pub fn frame(&mut self, now: Instant) {
        if self.redraw.take() {
            self.recompute(now);
        }
        self.background.update(now, self.carousel.entries());
        if self.launch.update(now) {
            log::debug!("Launch status expired");
        }
        self.clock.update(now);
    }

    fn recompute(&mut self, now: Instant) {
        self.wheel.retarget(now, self.carousel.layouts());
        self.background.request(now, self.carousel.current());
        let name = self
            .carousel
            .current_entry()
            .map(|e| e.name.clone())
            .unwrap_or_default();
        if name != self.title.text {
            self.title.text = name;
            self.title.slide = Some(Tween::new(now, self.title_slide, easing::ease_out_cubic));
        }
    }

    /// Snapshot of everything to draw at `now`.
    pub fn scene(&self, now: Instant) -> Scene {
        let layouts = self.wheel.layouts(now);
        let mut items: Vec<SceneItem> = layouts
            .iter()
            .zip(self.carousel.entries())
            .enumerate()
            .map(|(index, (layout, entry))| SceneItem {
                index,
                rect: self.geometry.rect(layout),
                opacity: layout.opacity,
                active: layout.active,
                z_order: layout.z_order,
                logo: entry.logo.clone(),
                initial: entry.initial(),
            })
            .collect();
        items.sort_by_key(|item| item.z_order);

        let progress = self.title.slide.map_or(1.0, |t| t.progress(now));
        let offset_y = self
            .title
            .slide
            .map_or(0.0, |t| t.value(now, -TITLE_SLIDE_PX, 0.0));
        let text = if self.launch.status_active(now) {
            self.language.strings().launching.to_string()
        } else {
            self.title.text.clone()
        };

        Scene {
            viewport: (self.geometry.width, self.geometry.height),
            background: self.background.layers(now),
            items,
            title: TitleView {
                text,
                offset_y,
                opacity: progress,
            },
            clock: self.clock.text().to_string(),
            language_label: self.language.label(),
            chrome: Chrome::for_viewport(self.geometry.width, self.geometry.height),
        }
    }
}
