//! FLHook Script - Core Logic
//!
//! This crate contains the scripting shim proper: the attribute/method proxy
//! protocol over host handles, the struct converters, host commands, callback
//! dispatch, and plugin lifecycle.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Host constants, handles and script values
//! - [`engine`] - Bound host functions

// Allow the crate to refer to itself as `flhook_core` for proc macro compatibility
extern crate self as flhook_core;

pub use flhook_engine as engine;
pub use flhook_sdk as sdk;

pub mod commands;
pub mod config;
pub mod console;
pub mod convert;
pub mod events;
pub mod lifecycle;
pub mod proxy;
pub mod records;

// Re-export commonly used items
pub use commands::{CommandError, CommandResult};
pub use config::{ConfigError, ConfigResult, CoreConfig};
pub use convert::{convert_proxy, convert_record, ConvertError, ConvertResult};
pub use events::{callback, EventFilter};
pub use lifecycle::{is_enabled, shutdown, startup, startup_with, StartupError};
pub use proxy::{
    required_host_functions, ClassSchema, ClientInfo, DamageList, HostClass, Quaternion, Vector,
};

// Re-export macros
pub use flhook_macros::HostClass;

#[cfg(test)]
mod tests {
    #[test]
    fn test_sdk_types_exist() {
        use crate::sdk::{Handle, PluginReturnCode};
        assert!(Handle::NULL.is_null());
        assert_eq!(PluginReturnCode::default().raw(), 0);
    }
}
