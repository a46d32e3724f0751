// borgrestore mounts borgmatic archives for file recovery
// Copyright (C) 2025  Javier Lancha Vázquez <javier.lancha@gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ui;

/// Returns every mount point below `root`, in traversal order.
///
/// Mount points nested inside other mount points are reported as well.
/// A missing `root` means nothing is mounted.
pub fn scan(root: &Path) -> Vec<PathBuf> {
    scan_with(root, is_mount_point)
}

/// Walks `root` and keeps the directories for which `probe` returns true.
pub fn scan_with(root: &Path, probe: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                ui::cli::warning!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .filter(|path| probe(path))
        .collect()
}

/// Returns true if `path` is the root of a mounted filesystem.
///
/// A directory is a mount point when it lives on a different device than
/// its parent, or when it is its own parent (`/`). Symlinks never are.
#[cfg(unix)]
pub fn is_mount_point(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Ok(metadata) = std::fs::symlink_metadata(path) else {
        return false;
    };
    if metadata.file_type().is_symlink() {
        return false;
    }

    let Ok(parent_metadata) = std::fs::metadata(path.join("..")) else {
        return false;
    };

    metadata.dev() != parent_metadata.dev() || metadata.ino() == parent_metadata.ino()
}

#[cfg(not(unix))]
pub fn is_mount_point(_path: &Path) -> bool {
    false
}
