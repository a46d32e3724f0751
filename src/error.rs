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

use std::path::PathBuf;

/// Fatal conditions of a restore session.
///
/// None of these are recovered from locally. They travel up to `main`
/// wrapped in an `anyhow::Error`, get printed and terminate the process
/// with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("This tool must be run as root")]
    NotPrivileged,

    #[error("Configuration directory '{}' does not exist", .0.display())]
    ConfigDirectoryMissing(PathBuf),

    #[error("No borgmatic config files found in '{}'", .0.display())]
    NoConfigsFound(PathBuf),

    /// The configuration has no usable repository path in any known schema.
    #[error("No repository found")]
    MissingRepository,

    /// A repository label that is not a single directory name.
    #[error("Invalid repository label '{0}'")]
    InvalidLabel(String),

    #[error("No archives found in repository '{0}'")]
    NoArchivesFound(String),

    /// An external command exited with a failure status.
    #[error("Command failed: {command}\n{stderr}")]
    ExternalCommandFailed { command: String, stderr: String },
}
