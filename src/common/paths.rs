//! Configuration file lookup
//!
//! The config file is resolved in order: the `CARAVAN_CONFIG` environment
//! variable, a project-local `caravan.toml`, then the user config directory.

use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the configuration file
pub const CONFIG_FILE: &str = "caravan.toml";

/// Resolve the path of the configuration file
///
/// Returns the first candidate that is pinned by the environment or exists
/// on disk, falling back to the user config directory location.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CARAVAN_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    user_config_path()
}

/// Path of the config file in the user config directory
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "caravan").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_overrides_lookup() {
        std::env::set_var("CARAVAN_CONFIG", "/tmp/elsewhere.toml");
        assert_eq!(config_path(), Some(PathBuf::from("/tmp/elsewhere.toml")));
        std::env::remove_var("CARAVAN_CONFIG");
    }
}
