//! Error types for attribute access and record construction

/// Error raised by the attribute protocol of a live host object
///
/// Messages name the offending type and attribute the way script code
/// expects to see them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// Name is not part of the type's field schema
    #[error("'{class}' object has no attribute '{name}'")]
    Unknown { class: &'static str, name: String },

    /// Assignment on a type without a set function
    #[error("'{class}' object has no 'set' method (C++ const?)")]
    ReadOnly { class: &'static str, name: String },

    /// Deletion is never supported
    #[error("'{class}' attributes can not be deleted.")]
    Delete { class: &'static str },

    /// Assignment to a base-level reserved name
    #[error("{class}.{name} attribute can not be changed.")]
    Reserved { class: &'static str, name: String },

    /// Method call on a type without a call function
    #[error("'{class}' object has no method dispatcher (method id {method_id})")]
    NoMethods { class: &'static str, method_id: u32 },

    /// The host never supplied the function this type is wired to
    #[error("'{class}' host function {function} is not bound")]
    Unbound {
        class: &'static str,
        function: &'static str,
    },

    /// The host function reported failure
    #[error("'{class}' host function {function} failed")]
    HostFailed {
        class: &'static str,
        function: &'static str,
    },
}

/// Error raised when building a value record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Wrong number of positional values for the shape
    #[error("{record}() takes exactly {expected} arguments ({got} given)")]
    Arity {
        record: &'static str,
        expected: usize,
        got: usize,
    },
}
