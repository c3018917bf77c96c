use crate::ops::paths::Paths;
use crate::ops::util;
use crate::ops::{autostart, environment, hooks, menu, music, pip};
use anyhow::{Context, Result};

pub struct Installer {
    paths: Paths,
    accept_all: bool,
    dry_run: bool,
}

impl Installer {
    pub fn new(paths: Paths, accept_all: bool, dry_run: bool) -> Self {
        Self {
            paths,
            accept_all,
            dry_run,
        }
    }

    pub fn install(&self, prerelease: bool, force: bool) -> Result<()> {
        println!("Installing esbgm...");

        pip::install(prerelease, force, self.dry_run).context("install the es-bgm package")?;
        self.apply_integrations()?;

        // A dry run only planned; it has nothing finished to announce.
        if !self.dry_run {
            println!(
                "EmulationStation BGM installed successfully. Now go and put your music files inside the folder {} and reboot.",
                self.paths.music_dir.display()
            );
        }
        Ok(())
    }

    pub fn uninstall(&self) -> Result<()> {
        if !self.accept_all
            && !util::confirm("Are you sure you want to uninstall es-bgm? (y/N) ")?
        {
            println!("Aborting.");
            return Ok(());
        }

        println!("Uninstalling esbgm...");

        pip::uninstall(self.dry_run).context("uninstall the es-bgm package")?;
        self.remove_integrations()?;

        if !self.dry_run {
            println!("EmulationStation BGM uninstalled.");
        }
        Ok(())
    }

    /// Registers every system integration point; package installation is
    /// not part of this.
    pub fn apply_integrations(&self) -> Result<()> {
        let env = environment::detect(&self.paths);
        log::debug!("detected environment: {env:?}");

        menu::install(&self.paths, self.dry_run).context("menu entries")?;
        hooks::install(&self.paths, env, self.dry_run).context("runcommand hooks")?;
        autostart::install(&self.paths, env, self.dry_run).context("autostart registration")?;
        music::ensure(&self.paths, self.dry_run).context("music directory")?;
        Ok(())
    }

    pub fn remove_integrations(&self) -> Result<()> {
        let env = environment::detect(&self.paths);
        log::debug!("detected environment: {env:?}");

        autostart::uninstall(&self.paths, env, self.dry_run).context("autostart removal")?;
        hooks::uninstall(&self.paths, env, self.dry_run).context("runcommand hook removal")?;
        menu::uninstall(&self.paths, self.dry_run).context("menu entry removal")?;
        Ok(())
    }
}
