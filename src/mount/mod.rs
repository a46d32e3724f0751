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

//! Archives mounted below the mount root.
//!
//! The layout is `<root>/<label>/<archive>` or `<root>/<archive>` when the
//! repository has no label. Nothing besides the mount table is persisted:
//! labels and archive names are reconstructed from the mount point paths
//! every time the root is scanned.

pub mod lifecycle;
pub mod path;
pub mod scan;

use std::path::{Path, PathBuf};

pub use lifecycle::MountManager;

use crate::global::defaults::UNKNOWN_LABEL;

/// An archive mounted below the mount root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRecord {
    /// Repository label, if the mount point is inside a label directory.
    pub label: Option<String>,
    /// Archive name decoded from the mount point. Approximate, only for display.
    pub archive: String,
    pub mount_point: PathBuf,
}

impl MountRecord {
    /// Reconstructs the record of a mount point below `root`.
    pub fn from_mount_point(mount_point: PathBuf, root: &Path) -> Self {
        let (label, archive) = path::decode(&mount_point, root);
        Self {
            label,
            archive,
            mount_point,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

/// Scans `root` and decodes every mount point found.
pub fn mounted_archives(root: &Path) -> Vec<MountRecord> {
    mounted_archives_with(root, scan::is_mount_point)
}

/// Like [`mounted_archives`], deciding what is a mount point with `probe`.
pub fn mounted_archives_with(root: &Path, probe: impl Fn(&Path) -> bool) -> Vec<MountRecord> {
    scan::scan_with(root, probe)
        .into_iter()
        .map(|mount_point| MountRecord::from_mount_point(mount_point, root))
        .collect()
}
