//! Configuration for the scripting shim
//!
//! A single TOML file controls whether the plugin starts enabled and which
//! host callbacks are echoed to the console.
//!
//! - Auto-generation of a default file when missing
//! - Read once at startup; there is no runtime mutation
//!
//! # Example
//!
//! ```toml
//! version = 1
//! enabled = true
//! debug = false
//!
//! [callbacks]
//! ShipDestroyed = true
//! HkCbIServerImpl_SubmitChat = false
//! ```

mod loader;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{core_config_path, plugin_base_dir, PLUGIN_DIR};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Core plugin configuration.
///
/// Loaded from `flhook_plugins/flhook_script/core.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Start with callbacks enabled
    pub enabled: bool,

    /// Enable debug logging
    pub debug: bool,

    /// Per-event log toggles applied on top of the built-in table
    pub callbacks: BTreeMap<String, bool>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            enabled: true,
            debug: false,
            callbacks: BTreeMap::new(),
        }
    }
}

impl CoreConfig {
    /// Load core config from file, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&core_config_path()?)
    }

    /// Load config from `path`, creating default if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded core config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default core config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved core config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("flhook-script-test-{}", std::process::id()))
            .join(name)
            .join("core.toml")
    }

    #[test]
    fn test_core_config_default() {
        let config = CoreConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.enabled);
        assert!(!config.debug);
        assert!(config.callbacks.is_empty());
    }

    #[test]
    fn test_core_config_serialize() {
        let config = CoreConfig {
            version: 2,
            enabled: false,
            debug: true,
            callbacks: BTreeMap::from([("ShipDestroyed".to_string(), true)]),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 2"));
        assert!(toml_str.contains("enabled = false"));
        assert!(toml_str.contains("ShipDestroyed = true"));

        let parsed: CoreConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: CoreConfig = toml::from_str("[callbacks]\nHkTimerCheckKick = true\n").unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.callbacks.get("HkTimerCheckKick"), Some(&true));
    }

    #[test]
    fn test_missing_file_writes_default() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);

        let config = CoreConfig::load_from(&path).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(path.exists());

        let reloaded = CoreConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let path = scratch_path("bad");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "enabled = \"yes\"").unwrap();

        assert!(matches!(
            CoreConfig::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
