use anyhow::{anyhow, Result};
use directories::BaseDirs;
use std::path::PathBuf;

/// Every well-known location the installer touches, resolved once at startup.
///
/// Ops take `&Paths` instead of hardcoding locations so tests can root the
/// whole table under a scratch directory.
#[derive(Debug, Clone)]
pub struct Paths {
    /// RetroPie's shared config directory (autostart script + runcommand hooks).
    pub retropie_config_dir: PathBuf,
    /// Per-user XDG autostart directory for non-RetroPie hosts.
    pub desktop_autostart_dir: PathBuf,
    /// RetroPie menu directory the toggle scripts go into.
    pub menu_dir: PathBuf,
    /// Default directory the player scans for music files.
    pub music_dir: PathBuf,
}

impl Paths {
    pub fn system() -> Result<Self> {
        let base = BaseDirs::new().ok_or_else(|| anyhow!("unable to determine home directory"))?;

        Ok(Self {
            retropie_config_dir: PathBuf::from("/opt/retropie/configs/all"),
            desktop_autostart_dir: base.config_dir().join("autostart"),
            menu_dir: base.home_dir().join("RetroPie").join("retropiemenu"),
            music_dir: base.home_dir().join("RetroPie").join("roms").join("musics"),
        })
    }

    pub fn autostart_script(&self) -> PathBuf {
        self.retropie_config_dir.join("autostart.sh")
    }

    pub fn hook(&self, name: &str) -> PathBuf {
        self.retropie_config_dir.join(name)
    }

    pub fn desktop_entry(&self, name: &str) -> PathBuf {
        self.desktop_autostart_dir.join(name)
    }

    pub fn menu_script(&self, name: &str) -> PathBuf {
        self.menu_dir.join(name)
    }

    pub fn music_placeholder(&self) -> PathBuf {
        self.music_dir.join("PLACE_YOUR_MUSIC_HERE")
    }

    /// All four roots under one scratch directory.
    #[cfg(test)]
    pub fn scratch(root: &std::path::Path) -> Self {
        Self {
            retropie_config_dir: root.join("retropie"),
            desktop_autostart_dir: root.join("autostart"),
            menu_dir: root.join("retropiemenu"),
            music_dir: root.join("musics"),
        }
    }
}
