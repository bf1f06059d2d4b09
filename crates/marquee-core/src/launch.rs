//! Launch coordination and the transient "launching" status.

use std::time::{Duration, Instant};

use crate::entry::AppEntry;
use crate::schedule::Scheduled;

/// A confirmed launch, handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub id: String,
    pub path: String,
}

/// Gates launches on entry validity and owns the status timer.
///
/// The status is cosmetic: it is restored after a fixed time whatever the
/// host does with the process.
#[derive(Debug)]
pub struct LaunchCoordinator {
    restore: Scheduled<()>,
    status_duration: Duration,
}

impl LaunchCoordinator {
    pub fn new(status_duration: Duration) -> Self {
        Self {
            restore: Scheduled::new(),
            status_duration,
        }
    }

    /// Confirm on `entry`. Non-launchable entries yield nothing and leave
    /// the status untouched.
    pub fn confirm(&mut self, now: Instant, entry: &AppEntry) -> Option<LaunchRequest> {
        if !entry.is_launchable() {
            log::debug!("Ignoring confirm on non-launchable entry '{}'", entry.id);
            return None;
        }
        log::info!("Launching '{}' -> {}", entry.id, entry.path);
        self.restore.schedule(now, self.status_duration, ());
        Some(LaunchRequest {
            id: entry.id.clone(),
            path: entry.path.clone(),
        })
    }

    /// Whether the title should show the launching status.
    pub fn status_active(&self, now: Instant) -> bool {
        self.restore.deadline().is_some_and(|at| now < at)
    }

    /// Expire the status. Returns `true` when the title must be restored.
    pub fn update(&mut self, now: Instant) -> bool {
        self.restore.fire(now).is_some()
    }

    /// Drop the status early (the user navigated away). Returns `true`
    /// when a status was showing.
    pub fn cancel(&mut self) -> bool {
        let was = self.restore.is_pending();
        self.restore.cancel();
        was
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, PlaceholderKind, gradient_for};

    const MS: Duration = Duration::from_millis(1);

    fn app(path: &str) -> AppEntry {
        AppEntry {
            id: "retro".into(),
            name: "Retro".into(),
            path: path.into(),
            logo: None,
            background: None,
            bg_gradient: gradient_for(0),
            kind: EntryKind::Descriptor,
        }
    }

    #[test]
    fn confirm_launchable_arms_status() {
        let t0 = Instant::now();
        let mut l = LaunchCoordinator::new(4000 * MS);
        let req = l.confirm(t0, &app("/usr/bin/retroarch")).unwrap();
        assert_eq!(req.path, "/usr/bin/retroarch");
        assert_eq!(req.id, "retro");
        assert!(l.status_active(t0 + 3999 * MS));
        assert!(!l.update(t0 + 3999 * MS));
        assert!(l.update(t0 + 4000 * MS));
        assert!(!l.status_active(t0 + 4000 * MS));
        assert!(!l.update(t0 + 5000 * MS));
    }

    #[test]
    fn placeholder_is_never_launched() {
        let t0 = Instant::now();
        let mut l = LaunchCoordinator::new(4000 * MS);
        let entry = AppEntry::placeholder(PlaceholderKind::NoApps, "No Apps Found");
        assert_eq!(l.confirm(t0, &entry), None);
        assert!(!l.status_active(t0));
    }

    #[test]
    fn empty_location_is_never_launched() {
        let mut l = LaunchCoordinator::new(4000 * MS);
        assert_eq!(l.confirm(Instant::now(), &app("")), None);
    }

    #[test]
    fn repeated_confirm_extends_status() {
        let t0 = Instant::now();
        let mut l = LaunchCoordinator::new(4000 * MS);
        l.confirm(t0, &app("/bin/true"));
        l.confirm(t0 + 3000 * MS, &app("/bin/true"));
        assert!(!l.update(t0 + 4500 * MS));
        assert!(l.update(t0 + 7000 * MS));
    }

    #[test]
    fn cancel_clears_status() {
        let t0 = Instant::now();
        let mut l = LaunchCoordinator::new(4000 * MS);
        assert!(!l.cancel());
        l.confirm(t0, &app("/bin/true"));
        assert!(l.cancel());
        assert!(!l.status_active(t0 + MS));
        assert!(!l.update(t0 + 5000 * MS));
    }
}
