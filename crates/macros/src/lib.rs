//! FLHook Script Proc Macros
//!
//! This crate provides `#[derive(HostClass)]`, which turns a struct holding
//! a host handle into a live attribute proxy.
//!
//! # Example
//!
//! ```ignore
//! use std::marker::PhantomData;
//! use flhook_core::sdk::Handle;
//! use flhook_core::HostClass;
//!
//! #[derive(Debug, Clone, Copy, HostClass)]
//! #[host(class = "Vector", get = "Vector_GetAttr", set = "Vector_SetAttr")]
//! pub struct Vector {
//!     handle: Handle,
//!     x: PhantomData<f32>,
//!     y: PhantomData<f32>,
//!     z: PhantomData<f32>,
//! }
//!
//! // Generated methods forward to the host:
//! // - vector.x() -> Result<Value, AttributeError>
//! // - vector.set_x(1.0) -> Result<Value, AttributeError>
//! ```
//!
//! # Attributes
//!
//! ## Struct Attributes
//!
//! - `#[host(class = "Name")]` - **Required.** Type name used in error messages.
//! - `#[host(get = "Fn")]` - Host function reading a field. Without it reads yield `None`.
//! - `#[host(set = "Fn")]` - Host function writing a field. Without it no setters are
//!   generated and assignment fails as read-only.
//! - `#[host(call = "Fn")]` - Host function dispatching methods. Generates `call()`.
//!
//! ## Field Attributes
//!
//! - `#[host(field = "iShip")]` - Host field name, when it differs from the Rust name.
//!
//! Field order is the host index order. The `handle` field is not part of the schema.

mod host_class;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for host class proxies
///
/// # Generated Code
///
/// - A static `ClassSchema` holding field names and host function names
/// - `CLASS_NAME`, `FIELDS`, and per-field `*_FIELD` / `*_INDEX` constants
/// - A getter per field (`fn x(&self)`) and, for writable types, a setter
///   (`fn set_x(&self, value)`)
/// - `fn call(&self, method_id, args)` when a call function is configured
/// - `HostClass` and `ScriptObject` trait implementations
#[proc_macro_derive(HostClass, attributes(host))]
pub fn derive_host_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    host_class::derive_host_class(input).into()
}
