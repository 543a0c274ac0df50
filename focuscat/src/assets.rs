//! Locating the bundled sounds and pictures.

use std::path::{Path, PathBuf};

pub const ASSETS_ENV: &str = "FOCUSCAT_ASSETS";

/// `$FOCUSCAT_ASSETS`, else `assets/` beside the executable, else the
/// crate's own `assets/` (so `cargo run` from anywhere finds them), else
/// `./assets`.
pub fn assets_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(ASSETS_ENV) {
        return PathBuf::from(dir);
    }
    candidate_dirs()
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("assets"))
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir.join("assets"));
    }
    dirs.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));
    dirs
}

pub fn sounds_dir() -> PathBuf {
    assets_dir().join("sounds")
}

/// Picture shown behind the editor when the user has not chosen one.
pub fn default_background() -> PathBuf {
    assets_dir().join("images").join("bg_default.jpg")
}
