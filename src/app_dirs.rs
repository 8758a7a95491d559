//! Where the configurator looks for its user config files.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

/// Points the configurator at a different config directory.
pub const CONFIG_DIR_ENV: &str = "CONFIGURATOR_CONFIG_DIR";

/// Directory holding the user's `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    config_dir_from(env::var_os(CONFIG_DIR_ENV))
}

fn config_dir_from(overridden: Option<OsString>) -> Result<PathBuf> {
    match overridden {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => ProjectDirs::from("io", "kitchen", "configurator")
            .map(|dirs| dirs.config_local_dir().to_path_buf())
            .ok_or_else(|| anyhow!("no home directory to place configurator settings in")),
    }
}
