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

pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{error::RestoreError, global::defaults::CONFIG_EXTENSIONS};

pub use schema::{BorgmaticConfig, RepositoryConfig, normalize};

/// Lists the configuration files in `dir`, sorted by path.
pub fn list_configs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RestoreError::ConfigDirectoryMissing(dir.to_path_buf()).into());
    }

    let mut configs = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Could not list directory \'{}\'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && has_config_extension(&path) {
            configs.push(path);
        }
    }

    if configs.is_empty() {
        return Err(RestoreError::NoConfigsFound(dir.to_path_buf()).into());
    }

    configs.sort();
    Ok(configs)
}

/// Parses a configuration file.
pub fn load(path: &Path) -> Result<BorgmaticConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read \'{}\'", path.display()))?;

    // Files with no document at all, or an empty one, configure nothing.
    let value = match serde_yaml::Deserializer::from_str(&contents).next() {
        Some(document) => serde_yaml::Value::deserialize(document)
            .with_context(|| format!("Could not parse \'{}\'", path.display()))?,
        None => serde_yaml::Value::Null,
    };
    if value.is_null() {
        return Ok(BorgmaticConfig::default());
    }

    serde_yaml::from_value(value)
        .with_context(|| format!("Unexpected configuration layout in \'{}\'", path.display()))
}

/// Loads a configuration file and extracts its repository.
pub fn load_repository(path: &Path) -> Result<RepositoryConfig> {
    let config = load(path)?;
    let repo = normalize(&config)
        .with_context(|| format!("Invalid configuration \'{}\'", path.display()))?;
    Ok(repo)
}

// Matches on the name suffix, so a bare `.yaml` counts too.
fn has_config_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            CONFIG_EXTENSIONS
                .iter()
                .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
        })
}
