//! Host boundary for Marquee.
//!
//! The launcher core talks to its host only through the traits in this
//! crate: resolving the base directory, launching an external program,
//! quitting, and reading the wall clock.

mod host;
mod services;

pub use host::{BASE_PATH_ENV, DesktopHost, HostService, resolve_base_path};
pub use services::{DesktopClock, SystemTime, TimeService};
