//! Marquee core.
//!
//! Platform-agnostic carousel launcher engine: descriptor discovery and
//! asset resolution, the circular wheel model and its animation, the
//! debounced background crossfade, input dispatch, launch coordination,
//! localization and scene rendering through the backend traits. This
//! crate has no windowing or audio dependencies.

// Re-exports from marquee-types (foundation types and traits).
pub use marquee_types::backend;
pub use marquee_types::error;
pub use marquee_types::input;

pub use marquee_platform as platform;

pub mod animation;
pub mod assets;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod crossfade;
pub mod descriptor;
pub mod dispatch;
pub mod entry;
pub mod i18n;
pub mod launch;
pub mod launcher;
pub mod loader;
pub mod prefs;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod sound;
pub mod textures;
pub mod wheel;

#[cfg(test)]
mod test_utils;

pub use config::LauncherConfig;
pub use entry::AppEntry;
pub use i18n::Language;
pub use launcher::{Effect, Launcher};
