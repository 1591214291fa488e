//! Host Event Callbacks
//!
//! The host calls into the plugin for every hooked server event (player
//! launch, chat, base enter, ...). Each call arrives as an event name plus a
//! [`Value`](flhook_sdk::Value) payload.
//!
//! # Architecture
//!
//! ```text
//! Host hook → flhook_callback (FFI) → callback() → EventFilter → console
//! ```
//!
//! # Example
//!
//! ```ignore
//! use flhook_core::events::callback;
//! use flhook_core::sdk::Value;
//!
//! let code = callback("HkCbIServerImpl_PlayerLaunch", &Value::tuple([12, 3]));
//! assert_eq!(code.raw(), 0);
//! ```

mod dispatcher;
mod filter;

pub use dispatcher::{callback, dispatch, format_event};
pub use filter::{filter, install_filter, EventFilter, SUPPRESSED_EVENTS};
