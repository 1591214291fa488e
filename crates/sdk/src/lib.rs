//! FLHook Script SDK - Host Constants and Script Value Types
//!
//! This crate contains the type definitions shared by every layer of the
//! scripting shim. It has a single dependency and compiles quickly, allowing
//! parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`constants`] - FLHook error codes, plugin return codes, engine and equipment enums
//! - [`handle`] - Opaque host-owned object handles
//! - [`value`] - Dynamic values and immutable value records
//! - [`object`] - The attribute protocol implemented by live host proxies
//! - [`error`] - Attribute and record errors

pub mod constants;
pub mod error;
pub mod handle;
pub mod object;
pub mod value;

pub use constants::{EngineState, EquipmentType, HkError, PluginReturnCode};
pub use error::{AttributeError, RecordError};
pub use handle::Handle;
pub use object::ScriptObject;
pub use value::{Record, RecordShape, Value};
