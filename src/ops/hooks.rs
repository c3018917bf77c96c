use crate::ops::environment::Environment;
use crate::ops::paths::Paths;
use crate::ops::util;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

// RetroPie runs these right before and right after each emulated session.
// Bodies carry no trailing newline; earlier installers wrote them that way,
// and the already-matches check has to recognize those files.
const HOOKS: [(&str, &str); 2] = [
    ("runcommand-onstart.sh", "touch ~/.musicpaused.flag"),
    ("runcommand-onend.sh", "rm -f ~/.musicpaused.flag"),
];

pub fn install(paths: &Paths, env: Environment, dry_run: bool) -> Result<()> {
    if env != Environment::RetroPie {
        println!("runcommand hooks: not a RetroPie host (skipping)");
        return Ok(());
    }

    for (name, body) in HOOKS {
        install_hook(paths, name, body, dry_run).with_context(|| format!("install hook {name}"))?;
    }
    Ok(())
}

pub fn uninstall(paths: &Paths, env: Environment, dry_run: bool) -> Result<()> {
    if env != Environment::RetroPie {
        println!("runcommand hooks: not a RetroPie host (skipping)");
        return Ok(());
    }

    for (name, body) in HOOKS {
        restore_hook(paths, name, body, dry_run).with_context(|| format!("restore hook {name}"))?;
    }
    Ok(())
}

fn install_hook(paths: &Paths, name: &str, body: &str, dry_run: bool) -> Result<()> {
    let path = paths.hook(name);

    if path.exists() {
        let current = util::read_to_string(&path)?;
        if current == body {
            println!("{} already matches; no write needed", path.display());
            return Ok(());
        }

        // First backup wins: a reinstall must never clobber the preserved original.
        let backup = backup_path(&path);
        if !backup.exists() {
            if dry_run {
                println!(
                    "DRY-RUN would back up {} -> {}",
                    path.display(),
                    backup.display()
                );
            } else {
                util::copy_file(&path, &backup)?;
                println!("backed up {} -> {}", path.display(), backup.display());
            }
        }
    }

    if dry_run {
        println!("DRY-RUN would write {}", path.display());
        return Ok(());
    }

    util::write_string_atomic(&path, body).with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn restore_hook(paths: &Paths, name: &str, body: &str, dry_run: bool) -> Result<()> {
    let path = paths.hook(name);
    let backup = backup_path(&path);

    if backup.exists() {
        if dry_run {
            println!(
                "DRY-RUN would restore {} from {}",
                path.display(),
                backup.display()
            );
            return Ok(());
        }
        util::rename_file(&backup, &path)?;
        println!("restored {} from {}", path.display(), backup.display());
        return Ok(());
    }

    if !path.exists() {
        return Ok(());
    }

    // No backup means there was nothing here before us. Only delete content
    // we recognize as our own; a hand-edited hook stays.
    let current = util::read_to_string(&path)?;
    if current != body {
        println!("{} changed since install; leaving in place", path.display());
        return Ok(());
    }

    if dry_run {
        println!("DRY-RUN would remove {}", path.display());
        return Ok(());
    }

    util::remove_file_if_present(&path)?;
    println!("removed {}", path.display());
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".orig");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONSTART_BODY: &str = "touch ~/.musicpaused.flag";
    const ONEND_BODY: &str = "rm -f ~/.musicpaused.flag";

    fn retropie_paths(root: &Path) -> Paths {
        let paths = Paths::scratch(root);
        std::fs::create_dir_all(&paths.retropie_config_dir).unwrap();
        paths
    }

    #[test]
    fn fresh_install_writes_both_hooks_without_backups() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());

        install(&paths, Environment::RetroPie, false).unwrap();

        assert_eq!(
            std::fs::read_to_string(paths.hook("runcommand-onstart.sh")).unwrap(),
            ONSTART_BODY
        );
        assert_eq!(
            std::fs::read_to_string(paths.hook("runcommand-onend.sh")).unwrap(),
            ONEND_BODY
        );
        assert!(!backup_path(&paths.hook("runcommand-onstart.sh")).exists());
        assert!(!backup_path(&paths.hook("runcommand-onend.sh")).exists());
    }

    #[test]
    fn first_backup_survives_reinstalls() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());
        let onstart = paths.hook("runcommand-onstart.sh");
        std::fs::write(&onstart, "echo user hook\n").unwrap();

        install(&paths, Environment::RetroPie, false).unwrap();
        let backup = backup_path(&onstart);
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "echo user hook\n");

        // A later edit plus reinstall must not refresh the backup.
        std::fs::write(&onstart, "echo edited after install\n").unwrap();
        install(&paths, Environment::RetroPie, false).unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "echo user hook\n");
        assert_eq!(std::fs::read_to_string(&onstart).unwrap(), ONSTART_BODY);
    }

    #[test]
    fn reinstall_over_our_own_hook_takes_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());

        install(&paths, Environment::RetroPie, false).unwrap();
        install(&paths, Environment::RetroPie, false).unwrap();

        assert!(!backup_path(&paths.hook("runcommand-onstart.sh")).exists());
        assert!(!backup_path(&paths.hook("runcommand-onend.sh")).exists());
    }

    #[test]
    fn uninstall_restores_the_original_hook() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());
        let onend = paths.hook("runcommand-onend.sh");
        std::fs::write(&onend, "echo user hook\n").unwrap();

        install(&paths, Environment::RetroPie, false).unwrap();
        uninstall(&paths, Environment::RetroPie, false).unwrap();

        assert_eq!(std::fs::read_to_string(&onend).unwrap(), "echo user hook\n");
        assert!(!backup_path(&onend).exists());
    }

    #[test]
    fn uninstall_removes_hooks_we_created() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());

        install(&paths, Environment::RetroPie, false).unwrap();
        uninstall(&paths, Environment::RetroPie, false).unwrap();

        assert!(!paths.hook("runcommand-onstart.sh").exists());
        assert!(!paths.hook("runcommand-onend.sh").exists());
    }

    #[test]
    fn uninstall_leaves_hand_edited_hooks_alone() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());

        install(&paths, Environment::RetroPie, false).unwrap();
        let onstart = paths.hook("runcommand-onstart.sh");
        std::fs::write(&onstart, "touch ~/.musicpaused.flag\nmy-extra-step\n").unwrap();

        uninstall(&paths, Environment::RetroPie, false).unwrap();

        assert_eq!(
            std::fs::read_to_string(&onstart).unwrap(),
            "touch ~/.musicpaused.flag\nmy-extra-step\n"
        );
    }

    #[test]
    fn desktop_hosts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::scratch(dir.path());

        install(&paths, Environment::Desktop, false).unwrap();
        uninstall(&paths, Environment::Desktop, false).unwrap();

        assert!(!paths.retropie_config_dir.exists());
    }

    #[test]
    fn dry_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = retropie_paths(dir.path());
        let onstart = paths.hook("runcommand-onstart.sh");
        std::fs::write(&onstart, "echo user hook\n").unwrap();

        install(&paths, Environment::RetroPie, true).unwrap();
        assert_eq!(std::fs::read_to_string(&onstart).unwrap(), "echo user hook\n");
        assert!(!backup_path(&onstart).exists());
        assert!(!paths.hook("runcommand-onend.sh").exists());
    }
}
