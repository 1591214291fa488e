//! FLHook Script Engine - Host Function Binding and Global Storage
//!
//! This crate handles:
//! - Resolving the functions the host supplies at load time (console and log
//!   sinks, per-class get/set/call functions, host commands)
//! - Storing them in a write-once global
//! - Providing access to the bound host throughout the framework
//!
//! # Architecture
//!
//! Host functions are resolved once during plugin load via
//! [`loader::load_host`] and stored in [`globals::HostGlobals`]. Access is
//! provided via the [`try_host()`] function.
//!
//! # Thread Safety
//!
//! The host drives every entry point from its own thread. The thread that
//! bound the host is recorded for runtime checks via [`is_main_thread()`].

pub mod error;
pub mod globals;
pub mod loader;

pub use error::BindError;
pub use globals::{init_host, is_main_thread, try_host, ClassFn, CommandFn, HostGlobals, SinkFn};
pub use loader::{load_host, FunctionFactory};
