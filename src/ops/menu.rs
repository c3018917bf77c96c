use crate::ops::paths::Paths;
use crate::ops::util;
use anyhow::{Context, Result};

// Shown as entries in the RetroPie menu; EmulationStation runs them on select.
const DISABLE_SCRIPT_NAME: &str = "Disable background music.sh";
const ENABLE_SCRIPT_NAME: &str = "Enable background music.sh";

const DISABLE_SCRIPT: &str = r#"#!/bin/bash
mkdir -p ~/.config/esbgm
touch ~/.config/esbgm/disable.flag
"#;

const ENABLE_SCRIPT: &str = r#"#!/bin/bash
rm -f ~/.config/esbgm/disable.flag
"#;

const SCRIPTS: [(&str, &str); 2] = [
    (DISABLE_SCRIPT_NAME, DISABLE_SCRIPT),
    (ENABLE_SCRIPT_NAME, ENABLE_SCRIPT),
];

pub fn install(paths: &Paths, dry_run: bool) -> Result<()> {
    // RetroPie owns this directory; extend it when present, never create it.
    if !paths.menu_dir.exists() {
        println!("{} not present (skipping menu entries)", paths.menu_dir.display());
        return Ok(());
    }

    for (name, body) in SCRIPTS {
        let path = paths.menu_script(name);

        if path.exists() && util::read_to_string(&path)? == body {
            println!("{} already matches; no write needed", path.display());
            continue;
        }

        if dry_run {
            println!("DRY-RUN would write {}", path.display());
            continue;
        }

        util::write_string_atomic(&path, body)
            .with_context(|| format!("write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

pub fn uninstall(paths: &Paths, dry_run: bool) -> Result<()> {
    if !paths.menu_dir.exists() {
        println!("{} not present (skipping menu entries)", paths.menu_dir.display());
        return Ok(());
    }

    for (name, _) in SCRIPTS {
        let path = paths.menu_script(name);

        if dry_run {
            if path.exists() {
                println!("DRY-RUN would remove {}", path.display());
            }
            continue;
        }

        if util::remove_file_if_present(&path)? {
            println!("removed {}", path.display());
        }
    }
    Ok(())
}
