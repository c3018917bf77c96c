use crate::ops::environment::Environment;
use crate::ops::paths::Paths;
use crate::ops::util;
use anyhow::{Context, Result};

const LAUNCH_BLOCK_BEGIN: &str = "# >>> esbgm >>>";
const LAUNCH_BLOCK_END: &str = "# <<< esbgm <<<";

// Boot-time cleanup of the pause flag, in case the last session died mid-game.
const FLAG_CLEANUP_LINE: &str = "rm -f ~/.musicpaused.flag";
const LAUNCH_LINE: &str = "/home/pi/.local/bin/esbgm > /dev/null 2>&1 &";

const DESKTOP_ENTRY_NAME: &str = "esbgm.desktop";
// Older installers wrote the uppercase name (and then failed to remove it).
const LEGACY_DESKTOP_ENTRY_NAME: &str = "ESBGM.desktop";

const DESKTOP_ENTRY: &str = r#"[Desktop Entry]
Type=Application
Exec=esbgm
X-GNOME-Autostart-enabled=true
NoDisplay=false
Hidden=false
Name[en_US]=ESBGM
Comment[en_US]=Run background music when emulationstation is up
X-GNOME-Autostart-Delay=0
"#;

pub fn install(paths: &Paths, env: Environment, dry_run: bool) -> Result<()> {
    match env {
        Environment::RetroPie => install_retropie(paths, dry_run),
        Environment::Desktop => install_desktop(paths, dry_run),
    }
}

pub fn uninstall(paths: &Paths, env: Environment, dry_run: bool) -> Result<()> {
    match env {
        Environment::RetroPie => uninstall_retropie(paths, dry_run),
        Environment::Desktop => uninstall_desktop(paths, dry_run),
    }
}

fn install_retropie(paths: &Paths, dry_run: bool) -> Result<()> {
    let script = paths.autostart_script();
    let current = util::read_to_string(&script)?;
    let updated = add_launch_block(&current);

    if current == updated {
        println!("{} already registers esbgm; no write needed", script.display());
        return Ok(());
    }

    if dry_run {
        println!("DRY-RUN would update {}", script.display());
        return Ok(());
    }

    util::write_string_atomic(&script, &updated)
        .with_context(|| format!("write {}", script.display()))?;
    println!("registered esbgm in {}", script.display());
    Ok(())
}

fn uninstall_retropie(paths: &Paths, dry_run: bool) -> Result<()> {
    let script = paths.autostart_script();
    let current = util::read_to_string(&script)?;
    let updated = strip_launch_block(&current);

    if current == updated {
        println!("no esbgm entries in {}", script.display());
        return Ok(());
    }

    if dry_run {
        println!("DRY-RUN would update {}", script.display());
        return Ok(());
    }

    util::write_string_atomic(&script, &updated)
        .with_context(|| format!("write {}", script.display()))?;
    println!("removed esbgm entries from {}", script.display());
    Ok(())
}

fn install_desktop(paths: &Paths, dry_run: bool) -> Result<()> {
    let entry = paths.desktop_entry(DESKTOP_ENTRY_NAME);
    let legacy = paths.desktop_entry(LEGACY_DESKTOP_ENTRY_NAME);

    // Whatever is there, the user may have tuned it. Never overwrite. An
    // entry under the legacy name is the same installation; a second copy
    // would start the player twice per login.
    if entry.exists() {
        if legacy.exists() {
            if dry_run {
                println!("DRY-RUN would remove {}", legacy.display());
            } else {
                util::remove_file_if_present(&legacy)?;
                println!("removed {}", legacy.display());
            }
        }
        println!("{} already present; leaving untouched", entry.display());
        return Ok(());
    }

    if legacy.exists() {
        if dry_run {
            println!(
                "DRY-RUN would rename {} -> {}",
                legacy.display(),
                entry.display()
            );
            return Ok(());
        }
        util::rename_file(&legacy, &entry)?;
        println!("renamed {} -> {}", legacy.display(), entry.display());
        return Ok(());
    }

    if dry_run {
        println!("DRY-RUN would write {}", entry.display());
        return Ok(());
    }

    util::ensure_dir(&paths.desktop_autostart_dir)?;
    util::write_string_atomic(&entry, DESKTOP_ENTRY)
        .with_context(|| format!("write {}", entry.display()))?;
    println!("wrote {}", entry.display());
    Ok(())
}

fn uninstall_desktop(paths: &Paths, dry_run: bool) -> Result<()> {
    for name in [DESKTOP_ENTRY_NAME, LEGACY_DESKTOP_ENTRY_NAME] {
        let entry = paths.desktop_entry(name);

        if dry_run {
            if entry.exists() {
                println!("DRY-RUN would remove {}", entry.display());
            }
            continue;
        }

        if util::remove_file_if_present(&entry)? {
            println!("removed {}", entry.display());
        }
    }
    Ok(())
}

// Every line this tool has ever written into the shared script mentions one
// of these markers, including the sentinels and the pre-sentinel format.
fn is_managed_line(line: &str) -> bool {
    line.contains("esbgm") || line.contains("musicpaused")
}

/// Drops our lines and keeps everything else byte-for-byte, including a
/// missing trailing newline on the final kept line.
fn strip_launch_block(current: &str) -> String {
    let mut out = String::new();
    for line in current.lines().filter(|line| !is_managed_line(line)) {
        out.push_str(line);
        out.push('\n');
    }

    let final_line_kept = current.lines().last().is_some_and(|line| !is_managed_line(line));
    if !current.ends_with('\n') && final_line_kept {
        out.pop();
    }

    out
}

/// Rebuilds the script with the launch block on top and everything foreign
/// below it. Running this on its own output is a no-op, and feeding it a
/// script from the pre-sentinel format converges it to the delimited one.
fn add_launch_block(current: &str) -> String {
    let mut out = String::with_capacity(current.len() + 128);
    out.push_str(LAUNCH_BLOCK_BEGIN);
    out.push('\n');
    out.push_str(FLAG_CLEANUP_LINE);
    out.push('\n');
    out.push_str(LAUNCH_LINE);
    out.push('\n');
    out.push_str(LAUNCH_BLOCK_END);
    out.push('\n');
    out.push_str(&strip_launch_block(current));
    out
}
