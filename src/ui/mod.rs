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

pub mod cli;
pub mod prompt;
pub mod status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::global::global_opts;

pub const PROGRESS_REFRESH_RATE_HZ: u64 = 10;
pub const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Creates a spinner for a blocking external command.
///
/// The spinner is hidden when logging is disabled. Callers must clear it
/// before printing anything else.
pub fn new_spinner(message: String) -> ProgressBar {
    if global_opts().verbosity == 0 {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_TICK_CHARS),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(1000 / PROGRESS_REFRESH_RATE_HZ));
    spinner
}
