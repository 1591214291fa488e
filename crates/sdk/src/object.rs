//! Attribute protocol for live host objects
//!
//! A [`ScriptObject`] is a proxy around a host [`Handle`]. Reads and writes go
//! through host-supplied functions keyed by field index, so the object itself
//! holds nothing but the handle.

use std::any::Any;
use std::fmt;

use crate::error::AttributeError;
use crate::handle::Handle;
use crate::value::Value;

/// Trait for live proxies around host-owned objects
///
/// Implemented by the `#[derive(HostClass)]` macro. Object safe, so proxies
/// can travel inside [`Value::Object`].
pub trait ScriptObject: fmt::Debug + Send + Sync + 'static {
    /// Type name used in error messages
    fn class_name(&self) -> &'static str;

    /// The wrapped host handle
    fn handle(&self) -> Handle;

    /// Read a named field
    fn get_attr(&self, name: &str) -> Result<Value, AttributeError>;

    /// Write a named field, returning the host's status value
    fn set_attr(&self, name: &str, value: Value) -> Result<Value, AttributeError>;

    /// Delete a named field (never supported)
    fn del_attr(&self, name: &str) -> Result<(), AttributeError>;

    /// Upcast for downcasting to the concrete proxy type
    fn as_any(&self) -> &dyn Any;
}

impl dyn ScriptObject {
    /// Downcast to a concrete proxy type
    pub fn downcast_ref<T: ScriptObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
