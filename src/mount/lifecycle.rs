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

use anyhow::{Context, Result};

use crate::{
    borg::Borg,
    config::RepositoryConfig,
    mount::{self, MountRecord, path},
    ui,
};

/// Decides whether a directory is a mount point.
pub type MountProbe = fn(&Path) -> bool;

/// Mounts archives below a mount root and tears them down again.
pub struct MountManager {
    root: PathBuf,
    borg: Borg,
    probe: MountProbe,
}

impl MountManager {
    pub fn new(root: PathBuf, borg: Borg) -> Self {
        Self {
            root,
            borg,
            probe: mount::scan::is_mount_point,
        }
    }

    /// Replaces the mount point detection. Used to run without real mounts.
    pub fn with_probe(mut self, probe: MountProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn borg(&self) -> &Borg {
        &self.borg
    }

    /// Scans the mount root.
    pub fn mounted(&self) -> Vec<MountRecord> {
        mount::mounted_archives_with(&self.root, self.probe)
    }

    /// Unmounts `mount_point` and removes the directories left empty.
    ///
    /// The label directory is only removed when no other archive remains in
    /// it, and the mount root is never removed.
    pub fn unmount(&self, mount_point: &Path) -> Result<()> {
        ui::cli::log!("\nUnmounting {}", mount_point.display());
        self.borg.unmount(mount_point)?;

        remove_empty_dir(mount_point);
        if let Some(parent) = mount_point.parent()
            && parent != self.root
        {
            remove_empty_dir(parent);
        }

        Ok(())
    }

    /// Mounts `archive` of `repo` and returns the mount point.
    pub fn mount(&self, repo: &RepositoryConfig, archive: &str) -> Result<PathBuf> {
        let mount_point = path::encode(&self.root, archive, repo.label.as_deref());

        std::fs::create_dir_all(&mount_point).with_context(|| {
            format!(
                "Could not create mount point \'{}\'",
                mount_point.display()
            )
        })?;

        ui::cli::log!("\nMounting archive: {}", archive);
        ui::cli::log!("Mount point     : {}", mount_point.display());

        self.borg.mount(repo, archive, &mount_point)?;
        Ok(mount_point)
    }
}

// Still holding other archives, or already gone. Neither is an error.
fn remove_empty_dir(path: &Path) {
    if let Err(e) = std::fs::remove_dir(path) {
        ui::cli::verbose_2!("Kept \'{}\': {}", path.display(), e);
    }
}
