//! Boxed script values for the host
//!
//! Values cross the boundary as `*mut Value` allocated here. Constructors
//! return an owned pointer; whoever ends up owning it frees it with
//! [`flhook_value_free`] or hands it back to an export that takes ownership.

use std::ffi::{c_char, c_void, CStr};

use flhook_sdk::{Handle, Value};

/// Discriminant of a script value, as seen from C
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    Str = 4,
    Handle = 5,
    Tuple = 6,
    Record = 7,
    Object = 8,
}

impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::None => ValueKind::None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Handle(_) => ValueKind::Handle,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Record(_) => ValueKind::Record,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

#[inline]
pub(crate) fn into_raw(value: Value) -> *mut Value {
    Box::into_raw(Box::new(value))
}

/// Take ownership of a boxed value
///
/// # Safety
/// `value` must be null or a pointer from this module not freed yet.
#[inline]
pub(crate) unsafe fn take(value: *mut Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(*Box::from_raw(value))
    }
}

#[no_mangle]
pub extern "C" fn flhook_value_none() -> *mut Value {
    into_raw(Value::None)
}

#[no_mangle]
pub extern "C" fn flhook_value_bool(value: bool) -> *mut Value {
    into_raw(Value::Bool(value))
}

#[no_mangle]
pub extern "C" fn flhook_value_int(value: i64) -> *mut Value {
    into_raw(Value::Int(value))
}

#[no_mangle]
pub extern "C" fn flhook_value_float(value: f64) -> *mut Value {
    into_raw(Value::Float(value))
}

/// Build a string value (invalid UTF-8 is replaced)
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_str(text: *const c_char) -> *mut Value {
    if text.is_null() {
        return std::ptr::null_mut();
    }
    let text = CStr::from_ptr(text).to_string_lossy().into_owned();
    into_raw(Value::Str(text))
}

/// Build a raw handle value
#[no_mangle]
pub extern "C" fn flhook_value_handle(handle: *mut c_void) -> *mut Value {
    into_raw(Value::Handle(Handle::from_ptr(handle)))
}

/// Build a tuple, taking ownership of every item
///
/// Null items become `None`.
///
/// # Safety
/// `items` must point to `len` pointers, each null or an owned value.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_tuple(items: *const *mut Value, len: usize) -> *mut Value {
    if items.is_null() || len == 0 {
        return into_raw(Value::Tuple(Vec::new()));
    }
    let items = std::slice::from_raw_parts(items, len)
        .iter()
        .map(|&item| take(item).unwrap_or_default())
        .collect();
    into_raw(Value::Tuple(items))
}

/// Free an owned value
///
/// # Safety
/// `value` must be null or an owned value not freed yet.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_free(value: *mut Value) {
    drop(take(value));
}

/// # Safety
/// `value` must be null or a live value.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_kind(value: *const Value) -> ValueKind {
    value.as_ref().map(ValueKind::from).unwrap_or(ValueKind::None)
}

/// Read an integer (bools count as 0/1); false if not an integer
///
/// # Safety
/// `value` must be null or a live value; `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_as_int(value: *const Value, out: *mut i64) -> bool {
    match value.as_ref().and_then(Value::as_int) {
        Some(v) if !out.is_null() => {
            *out = v;
            true
        }
        _ => false,
    }
}

/// Read a float (integers are widened); false if not numeric
///
/// # Safety
/// `value` must be null or a live value; `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_as_float(value: *const Value, out: *mut f64) -> bool {
    match value.as_ref().and_then(Value::as_float) {
        Some(v) if !out.is_null() => {
            *out = v;
            true
        }
        _ => false,
    }
}

/// # Safety
/// `value` must be null or a live value; `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_as_bool(value: *const Value, out: *mut bool) -> bool {
    match value.as_ref().and_then(Value::as_bool) {
        Some(v) if !out.is_null() => {
            *out = v;
            true
        }
        _ => false,
    }
}

/// Number of tuple items (0 for non-tuples)
///
/// # Safety
/// `value` must be null or a live value.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_tuple_len(value: *const Value) -> usize {
    value
        .as_ref()
        .and_then(Value::as_tuple)
        .map(<[Value]>::len)
        .unwrap_or(0)
}

/// Borrow a tuple item; null when out of range
///
/// The item lives as long as the tuple.
///
/// # Safety
/// `value` must be null or a live value.
#[no_mangle]
pub unsafe extern "C" fn flhook_value_tuple_get(value: *const Value, index: usize) -> *const Value {
    value
        .as_ref()
        .and_then(Value::as_tuple)
        .and_then(|items| items.get(index))
        .map_or(std::ptr::null(), |item| item as *const Value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_takes_items() {
        unsafe {
            let items = [flhook_value_int(4), std::ptr::null_mut(), flhook_value_bool(true)];
            let tuple = flhook_value_tuple(items.as_ptr(), items.len());

            assert_eq!(flhook_value_kind(tuple), ValueKind::Tuple);
            assert_eq!(flhook_value_tuple_len(tuple), 3);

            let mut out = 0i64;
            assert!(flhook_value_as_int(flhook_value_tuple_get(tuple, 0), &mut out));
            assert_eq!(out, 4);
            assert_eq!(flhook_value_kind(flhook_value_tuple_get(tuple, 1)), ValueKind::None);
            assert!(flhook_value_tuple_get(tuple, 3).is_null());

            assert_eq!(
                take(tuple).unwrap().to_string(),
                "(4, None, True)"
            );
        }
    }

    #[test]
    fn test_scalar_accessors() {
        unsafe {
            let f = flhook_value_float(1.5);
            let mut out = 0.0f64;
            assert!(flhook_value_as_float(f, &mut out));
            assert_eq!(out, 1.5);

            let mut flag = false;
            assert!(!flhook_value_as_bool(f, &mut flag));
            assert!(!flhook_value_as_int(std::ptr::null(), &mut 0));
            flhook_value_free(f);

            let s = flhook_value_str(c"Li Chen".as_ptr());
            assert_eq!(flhook_value_kind(s), ValueKind::Str);
            assert_eq!(take(s), Some(Value::from("Li Chen")));

            assert!(flhook_value_str(std::ptr::null()).is_null());
            assert_eq!(flhook_value_kind(std::ptr::null()), ValueKind::None);
            flhook_value_free(std::ptr::null_mut());
        }
    }
}
