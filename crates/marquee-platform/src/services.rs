//! Time service trait and desktop implementation.

use chrono::{Datelike, Local, Timelike};

use marquee_types::error::Result;

/// A simple wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

/// Abstraction over platform time services.
pub trait TimeService {
    /// Current local wall-clock time.
    fn now(&self) -> Result<SystemTime>;
}

/// Desktop clock backed by the system's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopClock;

impl DesktopClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimeService for DesktopClock {
    fn now(&self) -> Result<SystemTime> {
        let now = Local::now();
        Ok(SystemTime {
            year: now.year().clamp(0, u16::MAX as i32) as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        })
    }
}
