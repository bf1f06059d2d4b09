//! Foundation types and traits for Marquee.
//!
//! This crate contains the platform-agnostic types shared by every Marquee
//! crate: colors, input events, gamepad snapshots, backend trait definitions
//! and error types.

pub mod backend;
pub mod error;
pub mod input;
