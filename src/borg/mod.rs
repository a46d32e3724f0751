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

//! Borg commands used to browse and mount archives.

pub mod process;

use std::{path::Path, sync::Arc};

use anyhow::Result;

use crate::{
    config::RepositoryConfig,
    error::RestoreError,
    global::defaults::{MOUNT_UMASK, PASSPHRASE_ENV, UMOUNT_BINARY},
};

pub use process::{CommandRunner, Invocation, SystemRunner};

/// Builds and runs borg invocations for a repository.
pub struct Borg {
    binary: String,
    runner: Arc<dyn CommandRunner>,
}

impl Borg {
    pub fn new(binary: &str, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.to_string(),
            runner,
        }
    }

    /// Lists the archive names of a repository.
    pub fn list_archives(&self, repo: &RepositoryConfig) -> Result<Vec<String>> {
        let invocation = self
            .invocation(repo)
            .arg("list")
            .arg(&repo.repository_path)
            .arg("--short")
            .arg("--remote-path")
            .arg(&repo.remote_binary);

        let output = self.runner.run(&invocation)?;
        let archives: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if archives.is_empty() {
            return Err(RestoreError::NoArchivesFound(repo.repository_path.clone()).into());
        }

        Ok(archives)
    }

    /// Mounts `archive` read-only in `mount_point`.
    pub fn mount(&self, repo: &RepositoryConfig, archive: &str, mount_point: &Path) -> Result<()> {
        let invocation = self
            .invocation(repo)
            .arg("mount")
            .arg(format!("{}::{}", repo.repository_path, archive))
            .arg(mount_point)
            .arg("--remote-path")
            .arg(&repo.remote_binary)
            .arg("--umask")
            .arg(MOUNT_UMASK);

        self.runner.run(&invocation)?;
        Ok(())
    }

    /// Detaches whatever is mounted in `mount_point`.
    pub fn unmount(&self, mount_point: &Path) -> Result<()> {
        let invocation = Invocation::new(UMOUNT_BINARY).arg(mount_point);
        self.runner.run(&invocation)?;
        Ok(())
    }

    fn invocation(&self, repo: &RepositoryConfig) -> Invocation {
        let invocation = Invocation::new(&self.binary);
        match &repo.passphrase {
            Some(passphrase) => invocation.secret_env(PASSPHRASE_ENV, passphrase),
            None => invocation,
        }
    }
}
