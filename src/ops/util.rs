use anyhow::{anyhow, Context, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();

    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("no parent for {}", path.display()))?;

    let mut tmp = parent.to_path_buf();
    tmp.push(format!(
        ".{}.tmp",
        path.file_name().and_then(OsStr::to_str).unwrap_or("file")
    ));

    std::fs::write(&tmp, contents).with_context(|| format!("write temp {}", tmp.display()))?;

    // The rename swaps inodes; an existing target's mode must survive it.
    if let Ok(existing) = std::fs::metadata(path) {
        std::fs::set_permissions(&tmp, existing.permissions())
            .with_context(|| format!("set mode on {}", tmp.display()))?;
    }

    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).with_context(|| format!("create dir {}", path.display()))
}

/// Removes a file, treating "already gone" as success.
///
/// Returns whether the file was actually there.
pub fn remove_file_if_present(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}

pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    std::fs::copy(src, dst)
        .with_context(|| format!("copy {} -> {}", src.display(), dst.display()))?;
    Ok(())
}

pub fn rename_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    std::fs::rename(src, dst)
        .with_context(|| format!("rename {} -> {}", src.display(), dst.display()))
}

pub fn run(cmd: &mut Command) -> Result<Output> {
    let output = cmd.output().with_context(|| format!("spawn {:?}", cmd))?;
    Ok(output)
}

/// y/n prompt on stdin. Anything other than "y"/"yes" declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush().context("flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("read answer from stdin")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
