//! Descriptor discovery: turns the apps directory into carousel entries.
//!
//! One malformed descriptor never aborts loading of the rest, and the
//! returned list is never empty.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::assets::resolve_asset;
use crate::descriptor::Descriptor;
use crate::entry::{AppEntry, EntryKind, PlaceholderKind, gradient_for};
use crate::error::{MarqueeError, Result};
use crate::i18n::Strings;

/// Recognized descriptor extensions.
pub const DESCRIPTOR_EXTENSIONS: [&str; 2] = ["ini", "cfg"];

/// Counters for one load, logged after discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub skipped: usize,
}

/// Load entries from `base/<apps_dir>`.
///
/// Creates the directory when it is missing. When it cannot be established
/// or enumerated, a single "apps folder not found" placeholder is returned;
/// when it holds no valid descriptor, a single "no apps found" placeholder.
pub fn load_entries(base: &Path, apps_dir: &str, strings: &Strings) -> Vec<AppEntry> {
    let dir = base.join(apps_dir);
    if !ensure_dir(&dir) {
        return vec![AppEntry::placeholder(
            PlaceholderKind::FolderMissing,
            strings.apps_folder_not_found,
        )];
    }

    let files = match descriptor_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            log::error!("cannot read {}: {e}", dir.display());
            return vec![AppEntry::placeholder(
                PlaceholderKind::FolderMissing,
                strings.apps_folder_not_found,
            )];
        },
    };

    let (entries, report) = load_descriptor_files(base, &dir, &files);
    log::info!(
        "Discovered {} apps in {} ({} skipped)",
        report.accepted,
        dir.display(),
        report.skipped
    );

    if entries.is_empty() {
        return vec![AppEntry::placeholder(
            PlaceholderKind::NoApps,
            strings.no_apps_found,
        )];
    }
    entries
}

/// Make sure `dir` exists, creating one level if needed.
fn ensure_dir(dir: &Path) -> bool {
    if dir.is_dir() {
        return true;
    }
    match std::fs::create_dir(dir) {
        Ok(()) => {
            log::info!("Created apps directory {}", dir.display());
            true
        },
        Err(e) => {
            log::error!("Could not create apps dir {}: {e}", dir.display());
            dir.is_dir()
        },
    }
}

/// Whether `name` carries a descriptor extension (ASCII case-insensitive).
pub fn is_descriptor_name(name: &str) -> bool {
    split_descriptor_name(name).is_some()
}

/// Split `game.ini` into `("game", "ini")`.
fn split_descriptor_name(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    DESCRIPTOR_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
        .then_some((stem, ext))
}

/// Regular files with a descriptor extension, sorted by file name.
pub fn descriptor_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| is_descriptor_name(&e.file_name().to_string_lossy()))
        .map(|e| e.path())
        // Follows symlinks, so linked descriptors count.
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parse every file; positions in `files` drive gradient assignment.
fn load_descriptor_files(
    base: &Path,
    dir: &Path,
    files: &[PathBuf],
) -> (Vec<AppEntry>, LoadReport) {
    let mut entries = Vec::new();
    let mut report = LoadReport::default();
    let mut ids = HashSet::new();

    for (position, file) in files.iter().enumerate() {
        match load_one(file) {
            Ok(descriptor) => {
                let id = unique_id(file, &mut ids);
                entries.push(AppEntry {
                    id,
                    name: descriptor.platform,
                    path: descriptor.location.unwrap_or_default(),
                    logo: resolve_asset(descriptor.clear_logo.as_deref(), base, dir),
                    background: resolve_asset(descriptor.background.as_deref(), base, dir),
                    bg_gradient: gradient_for(position),
                    kind: EntryKind::Descriptor,
                });
                report.accepted += 1;
            },
            Err(e) => {
                log::warn!("Skipping {}: {e}", file.display());
                report.skipped += 1;
            },
        }
    }
    (entries, report)
}

fn load_one(file: &Path) -> Result<Descriptor> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| MarqueeError::Descriptor(format!("unreadable: {e}")))?;
    Descriptor::parse(&text)
}

/// File stem as id; a collision keeps the full file name, then a suffix.
fn unique_id(file: &Path, taken: &mut HashSet<String>) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = split_descriptor_name(&name)
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| name.clone());

    let mut id = stem;
    if taken.contains(&id) {
        id = name;
    }
    let mut n = 2;
    let root = id.clone();
    while taken.contains(&id) {
        id = format!("{root}-{n}");
        n += 1;
    }
    taken.insert(id.clone());
    id
}
