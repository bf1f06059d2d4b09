//! Status bar clock.

use std::time::{Duration, Instant};

use crate::platform::{SystemTime, TimeService};
use crate::schedule::Interval;

/// `HH:MM` text refreshed from a [`TimeService`] on a fixed interval.
pub struct ClockDisplay {
    service: Box<dyn TimeService>,
    interval: Interval,
    text: String,
    failing: bool,
}

impl ClockDisplay {
    /// Create the clock and read the time immediately.
    pub fn new(service: Box<dyn TimeService>, now: Instant, period: Duration) -> Self {
        let mut clock = Self {
            service,
            interval: Interval::new(now, period),
            text: String::new(),
            failing: false,
        };
        clock.update(now);
        clock
    }

    /// Refresh if the interval elapsed. Returns `true` when the text
    /// changed.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.interval.tick(now) {
            return false;
        }
        match self.service.now() {
            Ok(time) => {
                self.failing = false;
                let text = format_hh_mm(&time);
                if text == self.text {
                    return false;
                }
                self.text = text;
                true
            },
            Err(e) => {
                if !self.failing {
                    log::warn!("Clock unavailable: {e}");
                    self.failing = true;
                }
                false
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub fn format_hh_mm(time: &SystemTime) -> String {
    format!("{:02}:{:02}", time.hour, time.minute)
}
