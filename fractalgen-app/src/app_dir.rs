//! Directories the front end looks in for its data files.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Per-user configuration directory (e.g. `~/.config/fractalgen`), if the
/// platform has one.
pub fn config_directory() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "fractalgen").map(|d| d.config_dir().to_path_buf())
}

/// Where the colormap preset document is looked for, in priority order:
/// working directory, executable directory, user config directory.
pub fn preset_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("."), exe_directory()];
    dirs.extend(config_directory());
    dirs.dedup();
    dirs
}
