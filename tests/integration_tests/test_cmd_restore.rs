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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use tempfile::tempdir;

    use borgrestore::{
        commands::cmd_restore,
        error::RestoreError,
        testing::{self, FakeRunner, ScriptedInput},
    };

    use super::super::{ARCHIVES, FLAT_CONFIG, SECTIONED_CONFIG};
    use crate::test_utils::{fake_manager, fake_runner};

    fn restore_error(err: &anyhow::Error) -> &RestoreError {
        err.downcast_ref::<RestoreError>()
            .expect("Expected a RestoreError")
    }

    #[test]
    fn test_restore_labeled_archive() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "a.yaml", SECTIONED_CONFIG)?;
        testing::create_config_file(&config_dir, "b.yaml", FLAT_CONFIG)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["2", "2"]);

        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        let mount_point = root.join("nas").join("host-2024-01-01T10_00_00");
        assert!(testing::marker_probe(&mount_point));
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.prompts(), ["Select configuration", "Select archive"]);

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].command,
            "borg list /data/repo2 --short --remote-path borg14"
        );
        assert_eq!(
            calls[1].command,
            format!(
                "borg mount /data/repo2::host-2024-01-01T10:00:00 {} --remote-path borg14 --umask 022",
                mount_point.display()
            )
        );
        for call in &calls {
            assert_eq!(
                call.env,
                vec![(String::from("BORG_PASSPHRASE"), String::from("secret"))]
            );
            assert!(!call.command.contains("secret"));
        }

        let mounted = manager.mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].label.as_deref(), Some("nas"));
        assert_eq!(mounted[0].archive, "host-2024-01-01T10:00:00");

        Ok(())
    }

    #[test]
    fn test_restore_unlabeled_archive() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "a.yaml", SECTIONED_CONFIG)?;
        testing::create_config_file(&config_dir, "b.yaml", FLAT_CONFIG)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["1", "1"]);

        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        let mount_point = root.join("host-2023-12-31T10_00_00");
        assert!(testing::marker_probe(&mount_point));

        let calls = runner.calls();
        assert_eq!(calls[0].command, "borg list /data/repo --short --remote-path borg14");
        assert!(calls.iter().all(|call| call.env.is_empty()));

        let mounted = manager.mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].display_label(), "-");
        assert_eq!(mounted[0].archive, "host-2023-12-31T10_00_00");

        Ok(())
    }

    #[test]
    fn test_restore_reprompts_on_invalid_selection() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "a.yaml", SECTIONED_CONFIG)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["0", "9", "x", "1", "3", "", "2"]);

        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        assert_eq!(input.remaining(), 0);
        assert_eq!(input.prompts().len(), 7);
        assert!(testing::marker_probe(&root.join("host-2024-01-01T10_00_00")));

        Ok(())
    }

    #[test]
    fn test_restore_declines_unmount() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        let mounted = root.join("nas").join("host-2024-01-01T10_00_00");
        testing::mark_mounted(&mounted)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["n"]);

        // The configuration directory is never looked at.
        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        assert!(runner.calls().is_empty());
        assert!(testing::marker_probe(&mounted));
        assert_eq!(input.remaining(), 0);

        Ok(())
    }

    #[test]
    fn test_restore_unmounts_and_exits() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        let mounted = root.join("nas").join("host-2024-01-01T10_00_00");
        testing::mark_mounted(&mounted)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["y", "n"]);

        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command, format!("umount {}", mounted.display()));
        assert!(!mounted.exists());
        assert!(!root.join("nas").exists());
        assert!(root.is_dir());

        Ok(())
    }

    #[test]
    fn test_restore_unmounts_and_mounts_another() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "a.yaml", SECTIONED_CONFIG)?;
        testing::create_config_file(&config_dir, "b.yaml", FLAT_CONFIG)?;

        let old = root.join("nas").join("host-2023-12-31T10_00_00");
        testing::mark_mounted(&old)?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["y", "y", "2", "2"]);

        cmd_restore::run_with_manager(&config_dir, &manager, &mut input)?;

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].command.starts_with("umount "));
        assert!(calls[1].command.starts_with("borg list "));
        assert!(calls[2].command.starts_with("borg mount "));

        assert!(!old.exists());
        let mounted = manager.mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(
            mounted[0].mount_point,
            root.join("nas").join("host-2024-01-01T10_00_00")
        );

        Ok(())
    }

    #[test]
    fn test_restore_unmount_failure_is_fatal() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        let mounted = root.join("nas").join("host-2024-01-01T10_00_00");
        testing::mark_mounted(&mounted)?;

        let runner = Arc::new(
            FakeRunner::new()
                .simulating_mounts()
                .with_failure("umount", "umount: target is busy."),
        );
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["y", "n"]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(
            restore_error(&err),
            RestoreError::ExternalCommandFailed { stderr, .. } if stderr == "umount: target is busy."
        ));
        assert!(testing::marker_probe(&mounted));
        assert_eq!(input.remaining(), 1);

        Ok(())
    }

    #[test]
    fn test_restore_without_configs() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "notes.txt", "")?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&[]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(restore_error(&err), RestoreError::NoConfigsFound(_)));
        assert!(runner.calls().is_empty());

        Ok(())
    }

    #[test]
    fn test_restore_without_config_dir() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&[]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(
            restore_error(&err),
            RestoreError::ConfigDirectoryMissing(dir) if *dir == config_dir
        ));

        Ok(())
    }

    #[test]
    fn test_restore_config_without_repository() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "broken.yml", "location:\n    repositories: []\n")?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["1"]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(restore_error(&err), RestoreError::MissingRepository));
        assert!(format!("{:#}", err).contains("broken.yml"));
        assert!(runner.calls().is_empty());

        Ok(())
    }

    #[test]
    fn test_restore_rejects_label_outside_root() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(
            &config_dir,
            "escape.yaml",
            "repositories:\n    - path: /data/repo\n      label: ../../tmp\n",
        )?;

        let runner = fake_runner(ARCHIVES);
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["1"]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(
            restore_error(&err),
            RestoreError::InvalidLabel(label) if label == "../../tmp"
        ));
        assert!(format!("{:#}", err).contains("escape.yaml"));
        assert!(runner.calls().is_empty());
        assert!(!root.exists());

        Ok(())
    }

    #[test]
    fn test_restore_without_archives() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "b.yaml", FLAT_CONFIG)?;

        let runner = fake_runner("\n");
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["1"]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        assert!(matches!(
            restore_error(&err),
            RestoreError::NoArchivesFound(repo) if repo == "/data/repo2"
        ));
        assert!(!root.exists());

        Ok(())
    }

    #[test]
    fn test_restore_mount_failure_is_fatal() -> Result<()> {
        let tmp_dir = tempdir()?;
        let config_dir = tmp_dir.path().join("borgmatic");
        let root = tmp_dir.path().join("borgrestore");
        testing::create_config_file(&config_dir, "b.yaml", FLAT_CONFIG)?;

        let runner = Arc::new(
            FakeRunner::new()
                .simulating_mounts()
                .with_output("borg list", ARCHIVES)
                .with_failure("borg mount", "Failed to create/acquire the lock"),
        );
        let manager = fake_manager(&root, &runner);
        let mut input = ScriptedInput::new(&["1", "1"]);

        let err = cmd_restore::run_with_manager(&config_dir, &manager, &mut input).unwrap_err();
        match restore_error(&err) {
            RestoreError::ExternalCommandFailed { command, stderr } => {
                assert!(command.starts_with("borg mount /data/repo2::host-2023-12-31T10:00:00 "));
                assert_eq!(stderr, "Failed to create/acquire the lock");
            }
            other => panic!("Unexpected error: {:?}", other),
        }

        // No rollback: the directory stays for the next run to deal with.
        let mount_point = root.join("nas").join("host-2023-12-31T10_00_00");
        assert!(mount_point.is_dir());
        assert!(manager.mounted().is_empty());

        Ok(())
    }
}
