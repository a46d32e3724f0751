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

use std::{
    ffi::{OsStr, OsString},
    fmt,
    process::Command,
};

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};

use crate::{error::RestoreError, ui};

/// An external command to run.
///
/// `env` is an overlay applied to this invocation only, on top of the
/// inherited environment. It carries secrets, so it never shows up when
/// the invocation is displayed.
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    env: Vec<(String, SecretString)>,
}

impl Invocation {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn secret_env(mut self, key: &str, value: &SecretString) -> Self {
        self.env.push((
            key.to_string(),
            SecretString::from(value.expose_secret().to_owned()),
        ));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env(&self) -> impl Iterator<Item = (&str, &SecretString)> {
        self.env.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands.
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion and returns its stdout.
    ///
    /// A failure exit status is a `RestoreError::ExternalCommandFailed`.
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs commands as child processes of this one.
#[derive(Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        ui::cli::verbose_1!("Running: {}", invocation);

        let mut command = Command::new(invocation.program());
        command.args(invocation.args());
        for (key, value) in invocation.env() {
            command.env(key, value.expose_secret());
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to run \'{}\'", invocation.program()))?;

        if !output.status.success() {
            return Err(RestoreError::ExternalCommandFailed {
                command: invocation.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
