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

//! Mapping between archive names and mount point paths.
//!
//! Archive names may contain `:`, which is replaced by `_` in the mount
//! point. Decoding puts back the first two `_` of the name, which is exact
//! for names with exactly two `:` and no `_` of their own (e.g. borgmatic's
//! default `host-2024-01-01T10:00:00`). Any other name decodes to an
//! approximation that is only fit for display. Mounting and unmounting
//! always work with the path itself, never with a decoded name.

use std::path::{Component, Path, PathBuf};

use crate::global::defaults::{ARCHIVE_DELIMITER, DECODED_DELIMITERS, SANITIZED_DELIMITER};

/// Replaces every delimiter of an archive name so it can be used as a path segment.
pub fn sanitize(archive: &str) -> String {
    archive.replace(ARCHIVE_DELIMITER, SANITIZED_DELIMITER)
}

/// Returns true if `label` names a single directory below the mount root.
pub fn is_valid_label(label: &str) -> bool {
    let mut components = Path::new(label).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !label.contains(std::path::MAIN_SEPARATOR)
}

/// Returns the mount point of `archive` below `root`.
///
/// `label` must pass [`is_valid_label`].
pub fn encode(root: &Path, archive: &str, label: Option<&str>) -> PathBuf {
    let mut mount_point = root.to_path_buf();
    if let Some(label) = label {
        mount_point.push(label);
    }
    mount_point.push(sanitize(archive));
    mount_point
}

/// Reconstructs the label and archive name of a mount point below `root`.
///
/// The label is `None` when the mount point sits directly in `root` (or
/// outside of it). In that case the archive is the raw directory name,
/// since without a label directory there is no telling how the name was
/// sanitized.
pub fn decode(mount_point: &Path, root: &Path) -> (Option<String>, String) {
    let segments: Vec<String> = match mount_point.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    match segments.split_first() {
        Some((label, rest)) if !rest.is_empty() => {
            let archive = rest.join("/").replacen(
                SANITIZED_DELIMITER,
                ARCHIVE_DELIMITER,
                DECODED_DELIMITERS,
            );
            (Some(label.clone()), archive)
        }
        _ => (None, raw_name(mount_point)),
    }
}

fn raw_name(mount_point: &Path) -> String {
    mount_point
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
