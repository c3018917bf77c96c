use crate::ops::paths::Paths;
use crate::ops::util;
use anyhow::{Context, Result};

const PLACEHOLDER_TEXT: &str =
    "Place your music files in this directory (.ogg and .mp3 supported)";

pub fn ensure(paths: &Paths, dry_run: bool) -> Result<()> {
    let dir = &paths.music_dir;
    if !dir.exists() {
        if dry_run {
            println!("DRY-RUN would create {}", dir.display());
        } else {
            util::ensure_dir(dir)?;
            println!("created {}", dir.display());
        }
    }

    let placeholder = paths.music_placeholder();
    if placeholder.exists() {
        return Ok(());
    }

    if dry_run {
        println!("DRY-RUN would write {}", placeholder.display());
        return Ok(());
    }

    util::write_string_atomic(&placeholder, PLACEHOLDER_TEXT)
        .with_context(|| format!("write {}", placeholder.display()))?;
    println!("wrote {}", placeholder.display());
    Ok(())
}
