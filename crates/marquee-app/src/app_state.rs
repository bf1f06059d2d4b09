//! Binary-side state: everything the core asks the host to do.

use std::path::PathBuf;

use marquee_core::backend::AudioBackend;
use marquee_core::platform::HostService;
use marquee_core::prefs::Preferences;
use marquee_core::sound::SoundBank;
use marquee_core::Effect;

pub struct AppState<H: HostService> {
    pub host: H,
    pub audio: Option<Box<dyn AudioBackend>>,
    pub sounds: SoundBank,
    pub prefs: Preferences,
    /// `None` when the platform has no config directory; the language
    /// choice then lasts for this session only.
    pub prefs_path: Option<PathBuf>,
}

impl<H: HostService> AppState<H> {
    /// Apply queued launcher effects in order.
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Launch(path) => {
                    if let Err(e) = self.host.launch(&path) {
                        log::error!("Error launching app: {e}");
                    }
                },
                Effect::Quit => self.host.quit(),
                Effect::Play(sfx) => {
                    if let Some(audio) = self.audio.as_deref_mut() {
                        self.sounds.play(sfx, audio);
                    }
                },
                Effect::PersistLanguage(language) => {
                    self.prefs.app_lang = Some(language);
                    let Some(path) = &self.prefs_path else {
                        continue;
                    };
                    match self.prefs.save(path) {
                        Ok(()) => log::debug!("Saved {}", path.display()),
                        Err(e) => log::error!("Could not save preferences: {e}"),
                    }
                },
            }
        }
    }
}
