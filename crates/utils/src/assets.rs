use std::path::PathBuf;

const APP_DIR: &str = "plantcare";

/// Per-user configuration directory, e.g. `~/.config/plantcare`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Per-user data directory holding persisted client state
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn local_storage_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("local_storage.json"))
}
