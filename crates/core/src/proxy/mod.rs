//! Attribute/Method Proxy Protocol - Live views of host-owned objects
//!
//! A proxy wraps an opaque [`Handle`] and exposes the native object's fields
//! by name. Nothing is stored locally: every read, write and method call is
//! forwarded to a host function keyed by the field's position in the class
//! schema.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                Proxy (e.g. Vector { handle })                │
//! │   get_attr("y") / set_attr("y", v) / call_method(id, args)   │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │ ClassSchema: "y" → index 1
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │               Host class function (by name)                  │
//! │   Vector_GetAttr(handle, 1, (None,))                         │
//! │   Vector_SetAttr(handle, 1, (v,))                            │
//! │   DamageList_Functions(handle, 5, (None,))                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol
//!
//! - Reads of unknown names fail. With no get function the read yields `None`.
//! - Writes check reserved names first, then the schema, then the set function.
//! - Deletes always fail.
//! - Method calls send a fixed id and argument tuple, unvalidated.
//!
//! Concrete types are generated with `#[derive(HostClass)]`; see
//! [`classes`] for the registered ones.

pub mod classes;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

use flhook_sdk::{AttributeError, Handle, ScriptObject, Value};

pub use classes::{ClientInfo, DamageList, Quaternion, Vector};
pub use registry::{lookup_proxy, lookup_schema, proxy_types, required_host_functions, ProxyConstructor};

/// Base-level names every proxy owns; they can never be assigned
pub const RESERVED_NAMES: &[&str] = &[
    "_ptr",
    "_cname",
    "_attr",
    "_get_method",
    "_set_method",
    "_func_method",
];

/// Static description of a proxy type
///
/// Field order is authoritative: a field's position is the index passed to
/// the host's get/set functions.
#[derive(Debug)]
pub struct ClassSchema {
    /// Type name used in error messages
    pub class_name: &'static str,

    /// Ordered field names
    pub fields: &'static [&'static str],

    /// Host function reading a field
    pub get_function: Option<&'static str>,

    /// Host function writing a field
    pub set_function: Option<&'static str>,

    /// Host function dispatching method calls
    pub call_function: Option<&'static str>,
}

impl ClassSchema {
    /// Index of a field by name
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.fields
            .iter()
            .position(|f| *f == name)
            .map(|i| i as u32)
    }

    /// Whether assignment is supported at all
    pub fn is_writable(&self) -> bool {
        self.set_function.is_some()
    }

    /// Every host function this type is wired to
    pub fn host_functions(&self) -> impl Iterator<Item = &'static str> {
        [self.get_function, self.set_function, self.call_function]
            .into_iter()
            .flatten()
    }

    fn unknown(&self, name: &str) -> AttributeError {
        AttributeError::Unknown {
            class: self.class_name,
            name: name.to_string(),
        }
    }

    fn lookup(&self, name: &str) -> Result<u32, AttributeError> {
        self.index_of(name).ok_or_else(|| self.unknown(name))
    }
}

/// Trait for proxy types backed by a [`ClassSchema`]
///
/// This trait is implemented by the `#[derive(HostClass)]` macro alongside
/// [`ScriptObject`].
pub trait HostClass: ScriptObject + Sized {
    /// Wrap a host handle
    ///
    /// The handle is stored as-is; the host alone owns the object behind it.
    fn from_handle(handle: Handle) -> Self;

    /// The static schema for this type
    fn schema() -> &'static ClassSchema;
}

/// Read a named attribute
///
/// Reserved base-level names resolve locally and never reach the host.
pub fn get_attr(schema: &ClassSchema, handle: Handle, name: &str) -> Result<Value, AttributeError> {
    if let Some(value) = reserved_value(schema, handle, name) {
        return Ok(value);
    }

    let index = schema.lookup(name)?;
    match schema.get_function {
        Some(function) => invoke(schema, function, handle, index, Value::placeholder()),
        None => Ok(Value::None),
    }
}

/// Write a named attribute, returning the host's status value
pub fn set_attr(
    schema: &ClassSchema,
    handle: Handle,
    name: &str,
    value: Value,
) -> Result<Value, AttributeError> {
    if RESERVED_NAMES.contains(&name) {
        return Err(AttributeError::Reserved {
            class: schema.class_name,
            name: name.to_string(),
        });
    }

    let index = schema.lookup(name)?;
    let function = schema.set_function.ok_or_else(|| AttributeError::ReadOnly {
        class: schema.class_name,
        name: name.to_string(),
    })?;

    invoke(schema, function, handle, index, Value::Tuple(vec![value]))
}

/// Delete a named attribute (always fails)
pub fn del_attr(schema: &ClassSchema, _name: &str) -> Result<(), AttributeError> {
    Err(AttributeError::Delete {
        class: schema.class_name,
    })
}

/// Invoke a host method by id with a prepared argument tuple
///
/// The result is returned verbatim. Neither the id nor the argument shape is
/// checked here.
pub fn call_method(
    schema: &ClassSchema,
    handle: Handle,
    method_id: u32,
    args: Value,
) -> Result<Value, AttributeError> {
    let function = schema.call_function.ok_or(AttributeError::NoMethods {
        class: schema.class_name,
        method_id,
    })?;

    invoke(schema, function, handle, method_id, args)
}

fn reserved_value(schema: &ClassSchema, handle: Handle, name: &str) -> Option<Value> {
    let value = match name {
        "_ptr" => Value::Handle(handle),
        "_cname" => Value::from(schema.class_name),
        "_attr" => Value::tuple(schema.fields.iter().copied()),
        "_get_method" => Value::from(schema.get_function),
        "_set_method" => Value::from(schema.set_function),
        "_func_method" => Value::from(schema.call_function),
        _ => return None,
    };
    Some(value)
}

fn invoke(
    schema: &ClassSchema,
    function: &'static str,
    handle: Handle,
    index: u32,
    args: Value,
) -> Result<Value, AttributeError> {
    let unbound = || AttributeError::Unbound {
        class: schema.class_name,
        function,
    };

    let host = flhook_engine::try_host().ok_or_else(unbound)?;
    let host_fn = host.class_function(function).ok_or_else(unbound)?;

    tracing::trace!("{}({}, {}, {})", function, handle, index, args);

    host_fn(handle, index, args).ok_or(AttributeError::HostFailed {
        class: schema.class_name,
        function,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::testing::{self, Call};

    static POINT: ClassSchema = ClassSchema {
        class_name: "Point",
        fields: &["a", "b"],
        get_function: None,
        set_function: None,
        call_function: None,
    };

    #[test]
    fn test_index_of() {
        assert_eq!(POINT.index_of("a"), Some(0));
        assert_eq!(POINT.index_of("b"), Some(1));
        assert_eq!(POINT.index_of("c"), None);
        assert!(!POINT.is_writable());
        assert_eq!(POINT.host_functions().count(), 0);
    }

    #[test]
    fn test_read_without_get_function_is_none() {
        let value = get_attr(&POINT, Handle::from_raw(1), "a").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_reserved_names_read_locally() {
        let handle = Handle::from_raw(0x44);
        assert_eq!(get_attr(&POINT, handle, "_ptr").unwrap(), Value::Handle(handle));
        assert_eq!(get_attr(&POINT, handle, "_cname").unwrap(), Value::from("Point"));
        assert_eq!(
            get_attr(&POINT, handle, "_attr").unwrap(),
            Value::tuple(["a", "b"])
        );
        assert!(get_attr(&POINT, handle, "_set_method").unwrap().is_none());
    }

    #[test]
    fn test_reserved_check_precedes_schema() {
        let err = set_attr(&POINT, Handle::from_raw(1), "_ptr", Value::Int(0)).unwrap_err();
        assert_eq!(err.to_string(), "Point._ptr attribute can not be changed.");

        // Reserved wins even on a type with no set function
        let err = set_attr(&POINT, Handle::from_raw(1), "_attr", Value::None).unwrap_err();
        assert!(matches!(err, AttributeError::Reserved { .. }));
    }

    #[test]
    fn test_unknown_check_precedes_read_only() {
        let err = set_attr(&POINT, Handle::from_raw(1), "zz", Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "'Point' object has no attribute 'zz'");

        let err = set_attr(&POINT, Handle::from_raw(1), "a", Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "'Point' object has no 'set' method (C++ const?)");
    }

    #[test]
    fn test_delete_always_fails() {
        for name in ["a", "zz", "_ptr"] {
            let err = del_attr(&POINT, name).unwrap_err();
            assert_eq!(err.to_string(), "'Point' attributes can not be deleted.");
        }
    }

    #[test]
    fn test_call_without_dispatcher() {
        let err = call_method(&POINT, Handle::from_raw(1), 3, Value::placeholder()).unwrap_err();
        assert_eq!(
            err,
            AttributeError::NoMethods {
                class: "Point",
                method_id: 3
            }
        );
    }

    #[test]
    fn test_unbound_host_function() {
        testing::install();

        static ORPHAN: ClassSchema = ClassSchema {
            class_name: "Orphan",
            fields: &["x"],
            get_function: Some("Orphan_GetAttr"),
            set_function: None,
            call_function: None,
        };

        let err = get_attr(&ORPHAN, Handle::from_raw(1), "x").unwrap_err();
        assert_eq!(
            err,
            AttributeError::Unbound {
                class: "Orphan",
                function: "Orphan_GetAttr"
            }
        );
    }

    #[test]
    fn test_host_failure_surfaces() {
        testing::install();
        let handle = testing::fresh_handle();
        testing::fail_next(handle);

        let err = get_attr(Vector::schema(), handle, "x").unwrap_err();
        assert_eq!(
            err,
            AttributeError::HostFailed {
                class: "Vector",
                function: "Vector_GetAttr"
            }
        );
        assert_eq!(
            testing::calls(handle),
            vec![Call::new("Vector_GetAttr", handle, 0, Value::placeholder())]
        );
    }
}
