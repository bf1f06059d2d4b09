//! Debounced two-layer background crossfade.
//!
//! Two slots alternate as the visible layer. A selection change only
//! restarts a quiet-period timer; when it expires the newest selection's
//! fill is written into the hidden slot and the slots swap roles, so a
//! burst of navigation produces a single fade to where the user stopped.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::animation::{Tween, easing};
use crate::entry::{AppEntry, Gradient};
use crate::schedule::Scheduled;

/// What a background layer shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Image(PathBuf),
    Gradient(Gradient),
}

impl Fill {
    /// The entry's background image when it exists on disk, else its
    /// fallback gradient.
    pub fn for_entry(entry: &AppEntry) -> Self {
        match &entry.background {
            Some(path) if path.is_file() => Self::Image(path.clone()),
            _ => Self::Gradient(entry.bg_gradient),
        }
    }
}

/// One entry of the background draw list.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub fill: Fill,
    /// Drawn instead when an image fill cannot be decoded.
    pub fallback: Gradient,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    fill: Fill,
    fallback: Gradient,
}

impl Slot {
    fn layer(&self, alpha: f32) -> Layer {
        Layer {
            fill: self.fill.clone(),
            fallback: self.fallback,
            alpha,
        }
    }
}

#[derive(Debug)]
pub struct BackgroundCrossfade {
    slots: [Option<Slot>; 2],
    active: usize,
    pending: Scheduled<usize>,
    fade: Option<Tween>,
    debounce: Duration,
    duration: Duration,
    commits: usize,
}

impl BackgroundCrossfade {
    pub fn new(debounce: Duration, duration: Duration) -> Self {
        Self {
            slots: [None, None],
            active: 0,
            pending: Scheduled::new(),
            fade: None,
            debounce,
            duration,
            commits: 0,
        }
    }

    /// The selection moved to `index`; restart the quiet period.
    pub fn request(&mut self, now: Instant, index: usize) {
        self.pending.schedule(now, self.debounce, index);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Commit a pending change whose quiet period has elapsed. Returns
    /// `true` when the visible layer flipped.
    pub fn update(&mut self, now: Instant, entries: &[AppEntry]) -> bool {
        let Some(index) = self.pending.fire(now) else {
            return false;
        };
        let Some(entry) = entries.get(index) else {
            log::debug!("Background request for stale index {index}");
            return false;
        };
        let fill = Fill::for_entry(entry);
        if self.active_fill() == Some(&fill) {
            return false;
        }
        let target = 1 - self.active;
        log::debug!("Background -> {:?} (slot {target})", fill);
        self.slots[target] = Some(Slot {
            fill,
            fallback: entry.bg_gradient,
        });
        self.active = target;
        self.fade = Some(Tween::new(now, self.duration, easing::ease_in_out_quad));
        self.commits += 1;
        true
    }

    /// Draw list at `now`, bottom layer first.
    pub fn layers(&self, now: Instant) -> Vec<Layer> {
        let mut out = Vec::with_capacity(2);
        let Some(active) = &self.slots[self.active] else {
            return out;
        };
        let fading = self.fade.filter(|t| !t.is_finished(now));
        match fading {
            Some(tween) => {
                if let Some(old) = &self.slots[1 - self.active] {
                    out.push(old.layer(1.0));
                }
                out.push(active.layer(tween.progress(now)));
            },
            None => out.push(active.layer(1.0)),
        }
        out
    }

    pub fn active_fill(&self) -> Option<&Fill> {
        self.slots[self.active].as_ref().map(|s| &s.fill)
    }

    pub fn is_fading(&self, now: Instant) -> bool {
        self.fade.is_some_and(|t| !t.is_finished(now))
    }

    /// Number of committed background changes.
    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, GRADIENT_PALETTE, gradient_for};

    const MS: Duration = Duration::from_millis(1);

    fn entry(i: usize, background: Option<PathBuf>) -> AppEntry {
        AppEntry {
            id: format!("e{i}"),
            name: format!("E{i}"),
            path: String::new(),
            logo: None,
            background,
            bg_gradient: gradient_for(i),
            kind: EntryKind::Descriptor,
        }
    }

    fn fade() -> BackgroundCrossfade {
        BackgroundCrossfade::new(150 * MS, 600 * MS)
    }

    #[test]
    fn burst_collapses_to_one_commit() {
        let entries: Vec<_> = (0..5).map(|i| entry(i, None)).collect();
        let t0 = Instant::now();
        let mut bg = fade();
        for (k, index) in [1usize, 2, 3, 4].iter().enumerate() {
            let t = t0 + (k as u32 * 50) * MS;
            bg.request(t, *index);
            assert!(!bg.update(t + 10 * MS, &entries));
        }
        let last = t0 + 150 * MS;
        assert!(!bg.update(last + 149 * MS, &entries));
        assert!(bg.update(last + 150 * MS, &entries));
        assert_eq!(bg.commit_count(), 1);
        assert_eq!(bg.active_fill(), Some(&Fill::Gradient(gradient_for(4))));
    }

    #[test]
    fn same_fill_is_skipped_without_flip() {
        // Positions 0 and 5 share a palette gradient.
        let entries: Vec<_> = (0..6).map(|i| entry(i, None)).collect();
        let t0 = Instant::now();
        let mut bg = fade();
        bg.request(t0, 0);
        assert!(bg.update(t0 + 150 * MS, &entries));
        let later = t0 + 2000 * MS;
        bg.request(later, 5);
        assert!(!bg.update(later + 150 * MS, &entries));
        assert_eq!(bg.commit_count(), 1);
        assert!(!bg.is_fading(later + 150 * MS));
        assert_eq!(bg.layers(later + 150 * MS).len(), 1);
    }

    #[test]
    fn missing_image_falls_back_to_gradient() {
        let e = entry(2, Some(PathBuf::from("/definitely/not/here.png")));
        assert_eq!(Fill::for_entry(&e), Fill::Gradient(GRADIENT_PALETTE[2]));
    }

    #[test]
    fn existing_image_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("bg.png");
        std::fs::write(&img, b"png").unwrap();
        let e = entry(0, Some(img.clone()));
        assert_eq!(Fill::for_entry(&e), Fill::Image(img));
    }

    #[test]
    fn layers_draw_old_under_new_during_fade() {
        let entries: Vec<_> = (0..3).map(|i| entry(i, None)).collect();
        let t0 = Instant::now();
        let mut bg = fade();
        assert!(bg.layers(t0).is_empty());

        bg.request(t0, 0);
        bg.update(t0 + 150 * MS, &entries);
        let settled = t0 + 1000 * MS;
        bg.request(settled, 1);
        let commit = settled + 150 * MS;
        assert!(bg.update(commit, &entries));

        let mid = bg.layers(commit + 300 * MS);
        assert_eq!(mid.len(), 2);
        assert_eq!(mid[0].fill, Fill::Gradient(gradient_for(0)));
        assert_eq!(mid[0].alpha, 1.0);
        assert_eq!(mid[1].fill, Fill::Gradient(gradient_for(1)));
        assert!(mid[1].alpha > 0.0 && mid[1].alpha < 1.0);

        let done = bg.layers(commit + 600 * MS);
        assert_eq!(
            done,
            vec![Layer {
                fill: Fill::Gradient(gradient_for(1)),
                fallback: gradient_for(1),
                alpha: 1.0
            }]
        );
    }

    #[test]
    fn stale_index_is_ignored() {
        let entries = vec![entry(0, None)];
        let t0 = Instant::now();
        let mut bg = fade();
        bg.request(t0, 9);
        assert!(!bg.update(t0 + 200 * MS, &entries));
        assert_eq!(bg.commit_count(), 0);
    }
}
