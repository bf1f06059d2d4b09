//! Error types for Marquee.

use std::io;

/// Errors produced by the Marquee launcher.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("descriptor error: {0}")]
    Descriptor(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MarqueeError>;
