//! Host function table
//!
//! The host passes a [`HostApi`] to `flhook_startup`. Its text sinks and
//! class function and command resolvers are wrapped into the closures the
//! engine stores.

use std::ffi::{c_char, c_void, CString};
use std::sync::Arc;

use flhook_engine::{ClassFn, CommandFn, SinkFn};
use flhook_sdk::{Handle, Value};

/// Text sink: console print or log line
pub type HostTextFn = unsafe extern "C" fn(text: *const c_char);

/// Class get/set/call function
///
/// `args` is borrowed for the duration of the call. The result must come
/// from the `flhook_value_*` constructors and is owned by the plugin
/// afterwards; null reports failure.
pub type HostClassFn =
    unsafe extern "C" fn(handle: *mut c_void, index: u32, args: *const Value) -> *mut Value;

/// Resolves a class function by name (e.g. "Vector_GetAttr")
pub type ResolveClassFn = unsafe extern "C" fn(name: *const c_char) -> Option<HostClassFn>;

/// Host command (e.g. "HkMsg")
///
/// `args` is the borrowed argument tuple. The host may store a value from
/// the `flhook_value_*` constructors in `*reply`; the plugin owns it
/// afterwards. Returns an `HK_ERROR` code.
pub type HostCommandFn = unsafe extern "C" fn(args: *const Value, reply: *mut *mut Value) -> u32;

/// Resolves a host command by name
pub type ResolveCommandFn = unsafe extern "C" fn(name: *const c_char) -> Option<HostCommandFn>;

/// Function table supplied by the host at startup
#[repr(C)]
pub struct HostApi {
    /// `ConPrint`
    pub con_print: Option<HostTextFn>,

    /// `AddLog`
    pub add_log: Option<HostTextFn>,

    /// Class function resolver
    pub resolve_class_function: Option<ResolveClassFn>,

    /// Host command resolver
    pub resolve_command: Option<ResolveCommandFn>,
}

fn to_c_string(text: &str) -> CString {
    // Host strings are NUL terminated, so drop any embedded NULs
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

/// Wrap a host text function as an engine sink
pub fn wrap_sink(sink: HostTextFn) -> SinkFn {
    Box::new(move |text: &str| {
        let text = to_c_string(text);
        // SAFETY: the host guarantees the sink accepts any NUL-terminated string
        unsafe { sink(text.as_ptr()) }
    })
}

/// Wrap a host class function as an engine class function
pub fn wrap_class_function(function: HostClassFn) -> ClassFn {
    Arc::new(move |handle: Handle, index: u32, args: Value| {
        // SAFETY: `args` outlives the call; a non-null result is a boxed Value
        // produced by our own constructors
        unsafe {
            let result = function(handle.as_ptr(), index, &args);
            if result.is_null() {
                None
            } else {
                Some(*Box::from_raw(result))
            }
        }
    })
}

/// Wrap a host command as an engine command
pub fn wrap_command(command: HostCommandFn) -> CommandFn {
    Arc::new(move |args: Value| {
        let mut reply: *mut Value = std::ptr::null_mut();
        // SAFETY: `args` outlives the call; a non-null reply is a boxed Value
        // produced by our own constructors
        unsafe {
            let code = command(&args, &mut reply);
            let reply = if reply.is_null() {
                Value::None
            } else {
                *Box::from_raw(reply)
            };
            (code, reply)
        }
    })
}

/// Resolve and wrap a class function by name
///
/// # Safety
/// `resolve` must be a valid resolver for the lifetime of the plugin.
pub unsafe fn resolve_class_function(resolve: ResolveClassFn, name: &str) -> Option<ClassFn> {
    let name = CString::new(name).ok()?;
    resolve(name.as_ptr()).map(wrap_class_function)
}

/// Resolve and wrap a host command by name
///
/// # Safety
/// `resolve` must be a valid resolver for the lifetime of the plugin.
pub unsafe fn resolve_command(resolve: ResolveCommandFn, name: &str) -> Option<CommandFn> {
    let name = CString::new(name).ok()?;
    resolve(name.as_ptr()).map(wrap_command)
}
