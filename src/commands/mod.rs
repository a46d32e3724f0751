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

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

use crate::{
    borg::{Borg, SystemRunner},
    global::defaults::{DEFAULT_BORG_BINARY, DEFAULT_CONFIG_DIR, DEFAULT_MOUNT_ROOT},
    mount::MountManager,
    utils,
};

pub mod cmd_restore;
pub mod cmd_status;
pub mod cmd_umount;

// CLI arguments
#[derive(Parser, Debug)]
#[clap(
    version = env!("CARGO_PKG_VERSION"), // Version from crate metadata
    about = "Mount borgmatic archives read-only for file recovery",
    long_about = "Mount borgmatic archives read-only for file recovery.\n\n\
                  Without a command, shows the mounted archives, offers to unmount them \
                  and then walks through selecting a configuration and an archive to mount."
)]
pub struct Cli {
    // Subcommand. The interactive restore runs when there is none.
    #[command(subcommand)]
    pub command: Option<Command>,

    // Global arguments
    #[clap(flatten)]
    pub global_args: GlobalArgs,
}

// List of commands
#[derive(Subcommand, Debug)]
pub enum Command {
    Status(cmd_status::CmdArgs),
    Umount(cmd_umount::CmdArgs),
}

#[derive(Parser, Debug)]
#[clap(group = ArgGroup::new("verbosity_group"))]
pub struct GlobalArgs {
    /// Directory with the borgmatic configuration files
    #[clap(long, value_parser, default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Directory where archives are mounted
    #[clap(long, value_parser, default_value = DEFAULT_MOUNT_ROOT)]
    pub mount_root: PathBuf,

    /// Local borg binary
    #[clap(long = "borg", value_parser, default_value = DEFAULT_BORG_BINARY)]
    pub borg_binary: String,

    /// Disable logging (verbosity = 0)
    #[clap(long, value_parser, group = "verbosity_group")]
    pub quiet: bool,

    /// Set the verbosity level [0-3]
    #[clap(short = 'v', long, value_parser, group = "verbosity_group")]
    pub verbosity: Option<u32>,
}

/// Creates a mount manager that runs the real borg and umount commands.
pub(crate) fn new_mount_manager(global_args: &GlobalArgs) -> MountManager {
    let borg = Borg::new(&global_args.borg_binary, Arc::new(SystemRunner::new()));
    MountManager::new(global_args.mount_root.clone(), borg)
}

pub fn run(args: &Cli) -> Result<()> {
    utils::ensure_privileged()?;

    match &args.command {
        None => cmd_restore::run(&args.global_args),
        Some(Command::Status(cmd_args)) => cmd_status::run(&args.global_args, cmd_args),
        Some(Command::Umount(cmd_args)) => cmd_umount::run(&args.global_args, cmd_args),
    }
}
