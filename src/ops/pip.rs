use crate::ops::util;
use anyhow::Result;
use std::process::{Command, ExitStatus};
use thiserror::Error;

pub const PACKAGE: &str = "es-bgm";

/// pip finished with a non-zero status.
///
/// Kept as a typed error so `main` can forward pip's exit code as the
/// process exit code and surface the captured output.
#[derive(Debug, Error)]
#[error("pip {action} failed with {status}")]
pub struct PipFailure {
    pub action: &'static str,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl PipFailure {
    pub fn exit_code(&self) -> i32 {
        // Killed-by-signal carries no exit code; report a generic failure then.
        self.status.code().unwrap_or(1)
    }
}

pub fn install(prerelease: bool, force: bool, dry_run: bool) -> Result<()> {
    let mut args = vec!["install", "-U", PACKAGE];
    if prerelease {
        // The DRY-RUN line below already shows --pre; announce only real runs.
        if !dry_run {
            println!("Installing prerelease version");
        }
        args.push("--pre");
    }
    if force {
        args.push("--force-reinstall");
    }
    run_pip(&args, "install", dry_run)
}

pub fn uninstall(dry_run: bool) -> Result<()> {
    // -y: output is captured below, so pip must not stop to ask. The caller
    // owns the confirmation prompt.
    run_pip(&["uninstall", "-y", PACKAGE], "uninstall", dry_run)
}

fn run_pip(args: &[&str], action: &'static str, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("DRY-RUN python3 -m pip {}", args.join(" "));
        return Ok(());
    }

    let mut cmd = Command::new("python3");
    cmd.arg("-m").arg("pip").args(args);

    let out = util::run(&mut cmd)?;
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();

    if out.status.success() {
        log::debug!("pip {action} output:\n{stdout}");
        return Ok(());
    }

    Err(PipFailure {
        action,
        status: out.status,
        stdout,
        stderr,
    }
    .into())
}
