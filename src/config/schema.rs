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

//! borgmatic configuration schemas.
//!
//! Two shapes are understood. Older configurations group options into
//! sections (`location.repositories`, `location.remote_path`,
//! `storage.encryption_passphrase`), newer ones keep every option at the
//! top level. Only the first repository of a configuration is ever used.

use secrecy::SecretString;
use serde::Deserialize;

use crate::{error::RestoreError, global::defaults::DEFAULT_REMOTE_BORG, mount::path};

/// The parts of a borgmatic configuration file this tool reads.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BorgmaticConfig {
    pub location: Option<LocationSection>,
    pub storage: Option<StorageSection>,
    pub repositories: Option<Vec<RepositoryEntry>>,
    pub remote_path: Option<String>,
    pub encryption_passphrase: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocationSection {
    pub repositories: Option<Vec<RepositoryEntry>>,
    pub remote_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub encryption_passphrase: Option<String>,
}

/// An item of a `repositories` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    /// `- /data/repo`
    Path(String),
    /// `- path: /data/repo` with an optional `label`
    Record {
        path: Option<String>,
        label: Option<String>,
    },
    /// Anything else. Never yields a repository.
    Other(serde_yaml::Value),
}

impl RepositoryEntry {
    /// Returns the path and label of the entry, if it has a path.
    fn path_and_label(&self) -> Option<(String, Option<String>)> {
        match self {
            RepositoryEntry::Path(path) => non_empty(Some(path)).map(|path| (path, None)),
            RepositoryEntry::Record { path, label } => {
                non_empty(path.as_ref()).map(|path| (path, non_empty(label.as_ref())))
            }
            RepositoryEntry::Other(_) => None,
        }
    }
}

/// What is needed to list and mount the archives of a repository.
#[derive(Debug)]
pub struct RepositoryConfig {
    pub label: Option<String>,
    pub repository_path: String,
    /// Borg binary to run on the remote side.
    pub remote_binary: String,
    pub passphrase: Option<SecretString>,
}

/// Extracts the repository of a configuration in either schema.
pub fn normalize(config: &BorgmaticConfig) -> Result<RepositoryConfig, RestoreError> {
    let (remote_binary, mut repository) = match &config.location {
        Some(location) => (
            location.remote_path.clone(),
            first_repository(location.repositories.as_deref()),
        ),
        None => (config.remote_path.clone(), None),
    };

    if repository.is_none() {
        repository = first_repository(config.repositories.as_deref());
    }

    let (repository_path, label) = repository.ok_or(RestoreError::MissingRepository)?;
    if let Some(label) = label.as_deref().filter(|label| !path::is_valid_label(label)) {
        return Err(RestoreError::InvalidLabel(label.to_string()));
    }

    Ok(RepositoryConfig {
        label,
        repository_path,
        remote_binary: remote_binary.unwrap_or_else(|| DEFAULT_REMOTE_BORG.to_string()),
        passphrase: passphrase(config),
    })
}

fn first_repository(entries: Option<&[RepositoryEntry]>) -> Option<(String, Option<String>)> {
    entries?.first()?.path_and_label()
}

fn passphrase(config: &BorgmaticConfig) -> Option<SecretString> {
    let nested = config
        .storage
        .as_ref()
        .and_then(|storage| non_empty(storage.encryption_passphrase.as_ref()));

    nested
        .or_else(|| non_empty(config.encryption_passphrase.as_ref()))
        .map(SecretString::from)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
