//! Plugin startup, shutdown and the enabled flag
//!
//! A plugin that fails to start stays loaded but disabled: callbacks become
//! no-ops that return the default code.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::config::CoreConfig;
use crate::console;
use crate::events::{install_filter, EventFilter};
use crate::proxy::required_host_functions;

static ENABLED: AtomicBool = AtomicBool::new(false);

static CONFIG: RwLock<Option<CoreConfig>> = parking_lot::const_rwlock(None);

/// Startup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    /// Host functions were never bound
    #[error("Host functions are not bound")]
    HostNotBound,

    /// A registered proxy type is wired to a function the host lacks
    #[error("Host function {0} is missing")]
    MissingHostFunction(&'static str),
}

/// Whether callbacks are currently processed
#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Acquire)
}

pub(crate) fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Release);
}

/// The config the plugin started with (defaults before startup)
pub fn config() -> CoreConfig {
    CONFIG.read().clone().unwrap_or_default()
}

/// Check that every class function the proxy types use is bound
pub fn verify_host() -> Result<(), StartupError> {
    let host = flhook_engine::try_host().ok_or(StartupError::HostNotBound)?;
    for name in required_host_functions() {
        if host.class_function(name).is_none() {
            return Err(StartupError::MissingHostFunction(name));
        }
    }
    Ok(())
}

/// Start the plugin with the on-disk config
///
/// A config that cannot be read falls back to defaults.
pub fn startup() -> Result<(), StartupError> {
    let config = CoreConfig::load().unwrap_or_else(|e| {
        console::error(&format!("Failed to load core config: {}", e));
        CoreConfig::default()
    });
    startup_with(config)
}

/// Start the plugin with an explicit config
#[tracing::instrument(skip_all)]
pub fn startup_with(config: CoreConfig) -> Result<(), StartupError> {
    console::logger("Starting FLHook script....");

    if config.debug {
        tracing::debug!("Core config: {:?}", config);
    }

    let filter = EventFilter::builtin().with_overrides(&config.callbacks);
    if !install_filter(filter) {
        tracing::warn!("Event filter already installed, keeping the first one");
    }

    if let Err(e) = verify_host() {
        set_enabled(false);
        console::error(&format!("FLHook script startup error (disabled): {}", e));
        return Err(e);
    }

    let enabled = config.enabled;
    *CONFIG.write() = Some(config);
    set_enabled(enabled);

    if enabled {
        console::logger("FLHook script loaded OK!");
    } else {
        console::logger("FLHook script loaded (disabled by config)");
    }
    tracing::info!("FLHook script started (enabled: {})", enabled);
    Ok(())
}

/// Shut the plugin down
///
/// Called from the FFI layer when FLHook unloads the plugin.
pub fn shutdown() {
    console::logger("Stopping FLHook script....");
    set_enabled(false);
    tracing::info!("FLHook script shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::testing;

    #[test]
    fn test_startup_enables() {
        testing::install();
        let _guard = testing::lifecycle_lock();

        assert_eq!(verify_host(), Ok(()));
        startup_with(CoreConfig::default()).unwrap();
        assert!(is_enabled());
        assert!(testing::console_lines()
            .iter()
            .any(|l| l == "FLHook script loaded OK!\n"));

        shutdown();
        assert!(!is_enabled());
        set_enabled(true);
    }

    #[test]
    fn test_config_can_disable() {
        testing::install();
        let _guard = testing::lifecycle_lock();

        let config = CoreConfig {
            enabled: false,
            ..CoreConfig::default()
        };
        startup_with(config.clone()).unwrap();
        assert!(!is_enabled());
        assert_eq!(crate::lifecycle::config(), config);

        set_enabled(true);
    }
}
