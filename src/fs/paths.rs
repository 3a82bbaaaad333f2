//! Path resolution utilities for secret-santa
//!
//! Everything lives under one data directory: the config, the event
//! document, and the notice outbox.

use std::path::{Component, Path, PathBuf};

use crate::schemas::Config;

/// Data directory used when none is given
pub const DEFAULT_DATA_DIR: &str = "data";

/// Resolve the data directory, optionally using an override.
pub fn resolve_data_dir(dir_option: Option<&Path>) -> PathBuf {
    match dir_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_DATA_DIR),
    }
}

/// Get the path to the config.json file.
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Get the path to the event document.
pub fn get_store_path(data_dir: &Path, config: &Config) -> PathBuf {
    data_dir.join(&config.data_file)
}

/// Get the root of the notice outbox.
pub fn get_outbox_root(data_dir: &Path, config: &Config) -> PathBuf {
    data_dir.join(&config.outbox_dir)
}

/// Whether `name` is a single normal path component: not empty, not `.`
/// or `..`, not absolute, and free of separators. Ids joined under the
/// outbox root must pass this so notices never land outside it.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
