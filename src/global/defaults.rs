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

// -- Locations --
/// Directory holding one borgmatic configuration file per repository.
pub const DEFAULT_CONFIG_DIR: &str = "/root/borgmatic";
/// Every archive is mounted below this directory.
pub const DEFAULT_MOUNT_ROOT: &str = "/mnt/borgrestore";
pub const CONFIG_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

// -- External commands --
pub const DEFAULT_BORG_BINARY: &str = "borg";
/// Borg binary on the remote side when the configuration doesn't name one.
pub const DEFAULT_REMOTE_BORG: &str = "borg14";
pub const UMOUNT_BINARY: &str = "umount";
/// Keeps the mounted tree world-readable and traversable.
pub const MOUNT_UMASK: &str = "022";
pub const PASSPHRASE_ENV: &str = "BORG_PASSPHRASE";

// -- Mount path encoding --
/// Borg archive names may contain this, mount point names may not.
pub const ARCHIVE_DELIMITER: &str = ":";
pub const SANITIZED_DELIMITER: &str = "_";
/// Number of delimiters restored when decoding an archive name
/// (`host-2024-01-01T10:00:00` style names carry two).
pub const DECODED_DELIMITERS: usize = 2;
pub const UNKNOWN_LABEL: &str = "-";

// Display
pub const DEFAULT_VERBOSITY: u32 = 1;
