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

use colored::Colorize;

use crate::{mount::MountRecord, ui};

/// Prints the archives currently mounted below the mount root.
pub fn print_status(records: &[MountRecord]) {
    ui::cli::log!("\n{}", "STATUS:".bold());

    if records.is_empty() {
        ui::cli::log!(" - No archive mounted");
        return;
    }

    for record in records {
        ui::cli::log!(" - Repo   : {}", record.display_label().cyan());
        ui::cli::log!("   Archive: {}", record.archive.yellow());
        ui::cli::log!("   Mount  : {}", record.mount_point.display());
    }
}
