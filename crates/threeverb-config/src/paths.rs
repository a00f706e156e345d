//! Where user presets and render settings live on disk.
//!
//! Everything sits under `<config dir>/threeverb/`, with presets one level
//! down in `presets/`. On Linux that is `~/.config/threeverb/`.

use std::path::{Path, PathBuf};

use crate::{ConfigError, Preset, get_factory_preset};

const APP_NAME: &str = "threeverb";

const PRESETS_SUBDIR: &str = "presets";

const SETTINGS_FILE: &str = "settings.toml";

/// `<config dir>/threeverb`, or `./threeverb` when the platform has no
/// config directory.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Directory scanned for user presets.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// `settings.toml` inside [`user_config_dir`].
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Locate a preset file.
///
/// An existing file path wins; otherwise `name` (with or without `.toml`)
/// is looked up in `dir`.
pub fn find_preset_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let stem = name.strip_suffix(".toml").unwrap_or(name);
    let candidate = dir.join(format!("{stem}.toml"));
    candidate.is_file().then_some(candidate)
}

/// Load a preset by file path, user preset name or factory preset name,
/// in that order.
pub fn resolve_preset_in(dir: &Path, name: &str) -> Result<Preset, ConfigError> {
    if let Some(path) = find_preset_in(dir, name) {
        return Preset::load(path);
    }
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}

/// [`resolve_preset_in`] against the user presets directory.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    resolve_preset_in(&user_presets_dir(), name)
}

/// Sorted `.toml` files directly inside `dir`; empty when `dir` is unreadable.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}

/// Preset files in [`user_presets_dir`].
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset name for a file: its stem.
///
/// # Example
///
/// ```rust
/// use threeverb_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("presets/vocal_plate.toml"));
/// assert_eq!(name.as_deref(), Some("vocal_plate"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()?.to_str().map(str::to_owned)
}
