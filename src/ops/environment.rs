use crate::ops::paths::Paths;

/// Which autostart integration style the host gets.
///
/// The two variants are mutually exclusive: a host either carries RetroPie's
/// shared autostart script or it gets a freestanding XDG autostart entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// RetroPie image: patch the shared autostart script and install
    /// runcommand hooks next to it.
    RetroPie,
    /// Everything else: per-user desktop entry under the XDG autostart dir.
    Desktop,
}

pub fn detect(paths: &Paths) -> Environment {
    if paths.autostart_script().exists() {
        Environment::RetroPie
    } else {
        Environment::Desktop
    }
}
