//! Config path resolution
//!
//! FLHook runs with the server's `EXE` directory as working directory and
//! keeps plugin data under `flhook_plugins/`.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Plugin directory name under `flhook_plugins/`
pub const PLUGIN_DIR: &str = "flhook_script";

/// Returns the plugin base directory.
///
/// Path: `<server dir>/flhook_plugins/flhook_script/`
pub fn plugin_base_dir() -> ConfigResult<PathBuf> {
    let cwd = std::env::current_dir().map_err(ConfigError::IoError)?;
    Ok(cwd.join("flhook_plugins").join(PLUGIN_DIR))
}

/// Returns the core config path.
///
/// Path: `<server dir>/flhook_plugins/flhook_script/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(plugin_base_dir()?.join("core.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_path_format() {
        let path = core_config_path().unwrap();
        assert!(path.ends_with("flhook_plugins/flhook_script/core.toml"));
    }
}
