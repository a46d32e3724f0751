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

use anyhow::Result;
use clap::Args;

use crate::{
    commands::{GlobalArgs, new_mount_manager},
    mount::MountManager,
    ui,
};

#[derive(Args, Debug)]
#[clap(about = "Show the archives currently mounted")]
pub struct CmdArgs {}

pub fn run(global_args: &GlobalArgs, _args: &CmdArgs) -> Result<()> {
    let manager = new_mount_manager(global_args);
    run_with_manager(&manager)
}

pub fn run_with_manager(manager: &MountManager) -> Result<()> {
    ui::status::print_status(&manager.mounted());
    Ok(())
}
