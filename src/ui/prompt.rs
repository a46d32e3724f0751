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

use std::fmt::Display;

use anyhow::{Result, bail};
use dialoguer::Input;

use crate::ui;

/// A source of answers for interactive prompts.
pub trait InputSource {
    /// Shows `prompt` and returns the line entered by the operator.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from the terminal.
#[derive(Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Lists `options` numbered from 1 and asks until a valid number is entered.
///
/// Returns the index of the chosen option.
pub fn select<T: Display>(
    options: &[T],
    prompt: &str,
    input: &mut dyn InputSource,
) -> Result<usize> {
    if options.is_empty() {
        bail!("Nothing to select");
    }

    for (i, option) in options.iter().enumerate() {
        ui::cli::log_always!("{}) {}", i + 1, option);
    }

    loop {
        let answer = input.read_line(prompt)?;
        match parse_choice(&answer, options.len()) {
            Some(index) => return Ok(index),
            None => ui::cli::log_always!("Invalid selection."),
        }
    }
}

/// Asks a yes/no question. Anything other than `y` means no.
pub fn confirm(prompt: &str, input: &mut dyn InputSource) -> Result<bool> {
    let answer = input.read_line(prompt)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn parse_choice(answer: &str, num_options: usize) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let choice: usize = answer.parse().ok()?;
    if (1..=num_options).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}
