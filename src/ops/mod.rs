pub mod autostart;
pub mod environment;
pub mod hooks;
pub mod installer;
pub mod menu;
pub mod music;
pub mod paths;
pub mod pip;
pub mod util;
