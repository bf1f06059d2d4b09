//! Cancellable, replaceable deferred actions.
//!
//! Everything here is single-threaded and pull-based: the owner calls
//! `fire` once per frame with the current instant. The last `schedule`
//! wins, so bursts of requests collapse into exactly one delivery.

use std::time::{Duration, Instant};

/// A single pending value with a deadline.
#[derive(Debug)]
pub struct Scheduled<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Scheduled<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Scheduled<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) with `value`, due `delay` after `now`. Any value
    /// already pending is dropped.
    pub fn schedule(&mut self, now: Instant, delay: Duration, value: T) {
        self.pending = Some((now + delay, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Take the value if its deadline has been reached.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if now >= *at => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Fixed-period tick.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// First tick is due immediately.
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: now,
        }
    }

    /// `true` once per elapsed period. Missed periods are not replayed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
