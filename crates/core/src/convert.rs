//! Struct-to-value converters
//!
//! The host hands native structs to scripts in one of two ways:
//!
//! - [`convert_record`] copies the struct's fields into an immutable
//!   [`Record`] snapshot.
//! - [`convert_proxy`] wraps a handle to the live struct in a proxy whose
//!   reads and writes go back to the host.

use std::sync::Arc;

use flhook_sdk::{Handle, Record, RecordError, ScriptObject, Value};

use crate::proxy::{lookup_proxy, lookup_schema};
use crate::records::lookup_shape;

/// Converter errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// No record or proxy type is registered under the name
    #[error("Unregistered type: '{0}'")]
    UnregisteredType(String),

    /// Positional values do not match the record shape
    #[error(transparent)]
    Arity(#[from] RecordError),

    /// The host passed a null handle
    #[error("Cannot wrap a null handle as '{0}'")]
    NullHandle(&'static str),
}

/// Result type for converter operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Build a value record of a registered shape
///
/// `args` are the struct's fields in shape order.
pub fn convert_record(type_name: &str, args: Vec<Value>) -> ConvertResult<Record> {
    let shape = lookup_shape(type_name)
        .ok_or_else(|| ConvertError::UnregisteredType(type_name.to_string()))?;

    let record = Record::new(shape, args)?;
    tracing::trace!("Converted record {}", record);
    Ok(record)
}

/// Wrap a host handle in a registered proxy type
pub fn convert_proxy(type_name: &str, handle: Handle) -> ConvertResult<Arc<dyn ScriptObject>> {
    let (construct, schema) = lookup_proxy(type_name)
        .zip(lookup_schema(type_name))
        .ok_or_else(|| ConvertError::UnregisteredType(type_name.to_string()))?;

    if handle.is_null() {
        return Err(ConvertError::NullHandle(schema.class_name));
    }

    let proxy = construct(handle);

    tracing::trace!("Wrapped {} as {}", handle, proxy.class_name());
    Ok(proxy)
}
