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

//! Test doubles for the external collaborators of a restore session.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use parking_lot::Mutex;
use secrecy::ExposeSecret;

use crate::{
    borg::{CommandRunner, Invocation},
    error::RestoreError,
    global::defaults::UMOUNT_BINARY,
    ui::prompt::InputSource,
};

/// File that marks a directory as mounted for [`marker_probe`].
pub const MOUNT_MARKER: &str = ".borgrestore-test-mount";

/// A mount probe that treats directories holding a [`MOUNT_MARKER`] as mount points.
pub fn marker_probe(path: &Path) -> bool {
    path.join(MOUNT_MARKER).is_file()
}

/// Creates `path` and marks it as mounted.
pub fn mark_mounted(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create \'{}\'", path.display()))?;
    std::fs::write(path.join(MOUNT_MARKER), b"")
        .with_context(|| "Failed to create mount marker")?;
    Ok(())
}

/// Writes a configuration file into `dir`.
pub fn create_config_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let p = dir.join(file_name);
    std::fs::write(&p, contents).with_context(|| "Failed to create config file")?;
    Ok(p)
}

/// An invocation as seen by a [`FakeRunner`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    /// Environment overlay with the secrets exposed.
    pub env: Vec<(String, String)>,
}

/// A command runner that records invocations instead of running them.
///
/// Outputs and failures are matched by prefix against the displayed
/// command line; the first match wins. Unmatched commands succeed with
/// empty output.
#[derive(Default)]
pub struct FakeRunner {
    outputs: Vec<(String, String)>,
    failures: Vec<(String, String)>,
    simulate_mounts: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `prefix` print `stdout`.
    pub fn with_output(mut self, prefix: &str, stdout: &str) -> Self {
        self.outputs.push((prefix.to_string(), stdout.to_string()));
        self
    }

    /// Commands starting with `prefix` fail with `stderr`.
    pub fn with_failure(mut self, prefix: &str, stderr: &str) -> Self {
        self.failures.push((prefix.to_string(), stderr.to_string()));
        self
    }

    /// Mount commands mark their target as mounted and unmount commands
    /// remove the mark, as seen by [`marker_probe`].
    pub fn simulating_mounts(mut self) -> Self {
        self.simulate_mounts = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn simulate(&self, invocation: &Invocation) -> Result<()> {
        let args = invocation.args();
        if invocation.program() == UMOUNT_BINARY {
            let target = args.first().ok_or_else(|| anyhow!("umount without target"))?;
            let marker = Path::new(target).join(MOUNT_MARKER);
            if marker.exists() {
                std::fs::remove_file(marker)?;
            }
        } else if args.first().is_some_and(|arg| arg == "mount") {
            let target = args.get(2).ok_or_else(|| anyhow!("mount without target"))?;
            mark_mounted(Path::new(target))?;
        }
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        let command = invocation.to_string();
        self.calls.lock().push(RecordedCall {
            command: command.clone(),
            env: invocation
                .env()
                .map(|(key, value)| (key.to_string(), value.expose_secret().to_string()))
                .collect(),
        });

        if let Some((_, stderr)) = self
            .failures
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
        {
            return Err(RestoreError::ExternalCommandFailed {
                command,
                stderr: stderr.clone(),
            }
            .into());
        }

        if self.simulate_mounts {
            self.simulate(invocation)?;
        }

        Ok(self
            .outputs
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default())
    }
}

/// Replays a fixed list of answers.
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    /// Number of answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No answer left for prompt \'{}\'", prompt))
    }
}
