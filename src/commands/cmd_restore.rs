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

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::{
    commands::{GlobalArgs, new_mount_manager},
    config::{self, RepositoryConfig},
    global::defaults::UNKNOWN_LABEL,
    mount::MountManager,
    ui::{
        self,
        prompt::{self, InputSource, TerminalInput},
    },
};

pub fn run(global_args: &GlobalArgs) -> Result<()> {
    let manager = new_mount_manager(global_args);
    let mut input = TerminalInput;
    run_with_manager(&global_args.config_dir, &manager, &mut input)
}

/// Runs the interactive restore with a given mount manager and input source.
///
/// Unmounting what is already mounted comes first. Then a configuration
/// and one of its archives are selected and the archive is mounted.
pub fn run_with_manager(
    config_dir: &Path,
    manager: &MountManager,
    input: &mut dyn InputSource,
) -> Result<()> {
    ui::cli::log!("\n{}", "=== Borgmatic Restore Tool ===".bold());

    let mounted = manager.mounted();
    ui::status::print_status(&mounted);

    if !mounted.is_empty() {
        ui::cli::log_always!();
        if !prompt::confirm("Unmount existing archives? (y/n)", input)? {
            ui::cli::log!("\nExiting.");
            return Ok(());
        }

        for record in &mounted {
            manager.unmount(&record.mount_point)?;
        }
        ui::status::print_status(&manager.mounted());

        ui::cli::log_always!();
        if !prompt::confirm("Mount another archive? (y/n)", input)? {
            ui::cli::log!("\nExiting.");
            return Ok(());
        }
    }

    let configs = config::list_configs(config_dir)?;
    let config_names: Vec<String> = configs
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    ui::cli::log_always!();
    let config_path = &configs[prompt::select(&config_names, "Select configuration", input)?];
    ui::cli::log!("\nSelected config: {}", config_path.display());

    let repo = config::load_repository(config_path)?;
    print_overview(&repo);

    let spinner = ui::new_spinner(format!("Listing archives in {}", repo.repository_path));
    let archives = manager.borg().list_archives(&repo);
    spinner.finish_and_clear();
    let archives = archives?;

    ui::cli::log_always!();
    let archive = &archives[prompt::select(&archives, "Select archive", input)?];

    let mount_point = manager.mount(&repo, archive)?;

    ui::cli::log!("\n{}", "Done.".bold().green());
    ui::cli::log!("Browse the archive in {}", mount_point.display());
    ui::cli::log!("Re-run the tool to unmount.");

    Ok(())
}

fn print_overview(repo: &RepositoryConfig) {
    ui::cli::log!("\n{}", "Configuration overview:".bold());
    ui::cli::log!(
        "Label       : {}",
        repo.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    );
    ui::cli::log!("Repository  : {}", repo.repository_path);
    ui::cli::log!("Remote Borg : {}", repo.remote_binary);

    ui::cli::log!("\n{}", "Notice:".bold());
    ui::cli::log!(" - Archives are mounted {}", "READ-ONLY".bold());
    if repo.passphrase.is_some() {
        ui::cli::log!(" - Borg passphrase is used automatically");
    } else {
        ui::cli::log!(" - No passphrase configured, the repository must not need one");
    }
    ui::cli::log!(" - Repository data is {} modified", "NOT".bold());
}
