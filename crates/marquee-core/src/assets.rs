//! Asset path resolution.
//!
//! Descriptor artwork paths may be absolute, relative to the base directory,
//! or relative to the descriptor directory. Nonexistence is expected and
//! never an error.

use std::path::{Path, PathBuf};

/// Resolve a descriptor asset path.
///
/// First match wins: an existing absolute path, `base/candidate`,
/// `descriptor_dir/candidate`. When nothing exists the candidate is
/// returned unmodified so a later image-load failure can fall back
/// gracefully. An absent or empty candidate resolves to `None`.
pub fn resolve_asset(
    candidate: Option<&str>,
    base: &Path,
    descriptor_dir: &Path,
) -> Option<PathBuf> {
    let candidate = candidate.map(str::trim).filter(|c| !c.is_empty())?;
    let path = Path::new(candidate);

    if path.is_absolute() && path.is_file() {
        return Some(path.to_path_buf());
    }

    let from_base = base.join(path);
    if from_base.is_file() {
        return Some(from_base);
    }

    let from_descriptor = descriptor_dir.join(path);
    if from_descriptor.is_file() {
        return Some(from_descriptor);
    }

    log::debug!("asset not found, keeping as-is: {candidate}");
    Some(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(p: &Path) {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, b"x").unwrap();
    }

    #[test]
    fn none_and_empty_resolve_to_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_asset(None, dir.path(), dir.path()), None);
        assert_eq!(resolve_asset(Some(""), dir.path(), dir.path()), None);
        assert_eq!(resolve_asset(Some("   "), dir.path(), dir.path()), None);
    }

    #[test]
    fn existing_absolute_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("elsewhere/logo.png");
        touch(&abs);
        let got = resolve_asset(abs.to_str(), Path::new("/nope"), Path::new("/nope/apps"));
        assert_eq!(got, Some(abs));
    }

    #[test]
    fn base_relative_wins_over_descriptor_relative() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let apps = base.join("apps");
        touch(&base.join("bg.png"));
        touch(&apps.join("bg.png"));
        assert_eq!(
            resolve_asset(Some("bg.png"), base, &apps),
            Some(base.join("bg.png"))
        );
    }

    #[test]
    fn base_relative_when_only_base_has_it() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let apps = base.join("apps");
        fs::create_dir_all(&apps).unwrap();
        touch(&base.join("bg.png"));
        assert_eq!(
            resolve_asset(Some("bg.png"), base, &apps),
            Some(base.join("bg.png"))
        );
    }

    #[test]
    fn descriptor_relative_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let apps = base.join("apps");
        touch(&apps.join("art/logo.png"));
        assert_eq!(
            resolve_asset(Some("art/logo.png"), base, &apps),
            Some(apps.join("art/logo.png"))
        );
    }

    #[test]
    fn missing_returns_original_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        assert_eq!(
            resolve_asset(Some("missing/bg.jpg"), base, &base.join("apps")),
            Some(PathBuf::from("missing/bg.jpg"))
        );
    }

    #[test]
    fn missing_absolute_returns_original() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("gone.png");
        let got = resolve_asset(abs.to_str(), dir.path(), dir.path());
        assert_eq!(got, Some(abs));
    }

    #[test]
    fn directory_is_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let apps = base.join("apps");
        fs::create_dir_all(base.join("bg.png")).unwrap();
        touch(&apps.join("bg.png"));
        assert_eq!(
            resolve_asset(Some("bg.png"), base, &apps),
            Some(apps.join("bg.png"))
        );
    }
}
