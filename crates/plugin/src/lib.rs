//! FLHook Script Plugin - FFI Layer
//!
//! This crate provides the FFI boundary between the FLHook host and the Rust
//! core logic. It compiles to a cdylib (.dll) whose C header is generated
//! into `include/flhook_script.h`.

pub mod ffi;

pub use flhook_core::{shutdown, startup};
