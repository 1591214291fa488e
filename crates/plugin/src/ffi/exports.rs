//! C-compatible exports called by the FLHook host

use std::ffi::{c_char, c_int, c_void, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::instrument;
use tracing_subscriber::EnvFilter;

use flhook_core::{console, convert_proxy, convert_record, required_host_functions};
use flhook_engine::{init_host, load_host, BindError, FunctionFactory};
use flhook_sdk::{Handle, PluginReturnCode, Value};

use super::host::{resolve_class_function, resolve_command, wrap_sink, HostApi};
use super::value::{into_raw, take};

/// Env var controlling the tracing filter
const LOG_ENV: &str = "FLHOOK_LOG";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// Borrow a C string, replacing invalid UTF-8
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
unsafe fn c_str<'a>(text: *const c_char) -> Option<std::borrow::Cow<'a, str>> {
    if text.is_null() {
        None
    } else {
        Some(CStr::from_ptr(text).to_string_lossy())
    }
}

/// Bind host functions from the API table
///
/// # Safety
/// `api` must be null or point to a valid [`HostApi`].
unsafe fn bind_host(api: *const HostApi) -> Result<(), BindError> {
    let api = api.as_ref().ok_or(BindError::NullApi)?;

    let console = api.con_print.map(wrap_sink);
    let log = api.add_log.map(wrap_sink);
    let resolve = api.resolve_class_function;
    let resolve_cmd = api.resolve_command;

    // SAFETY: the host keeps its resolvers alive while the plugin is loaded
    let classes = FunctionFactory::new(
        move |name: &str| resolve.and_then(|r| unsafe { resolve_class_function(r, name) }),
        "FLHookClasses",
    );
    let commands = FunctionFactory::new(
        move |name: &str| resolve_cmd.and_then(|r| unsafe { resolve_command(r, name) }),
        "FLHookCommands",
    );

    let required = required_host_functions();
    let command_names = flhook_core::commands::command_names();
    let globals = load_host(console, log, &classes, &required, &commands, &command_names)?;
    init_host(globals)
}

/// Called when FLHook loads the plugin
///
/// Returns false if the host could not be bound or startup failed; the
/// plugin then stays disabled.
///
/// # Safety
/// - `api` must be null or point to a valid [`HostApi`] whose functions stay
///   valid until `flhook_shutdown` returns
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn flhook_startup(api: *const HostApi) -> bool {
    init_tracing();
    tracing::info!("FLHook script loading...");

    if let Err(e) = bind_host(api) {
        tracing::error!("Failed to bind host: {}", e);
        console::error(&format!("FLHook script bind error (disabled): {}", e));
        return false;
    }

    match catch_unwind(flhook_core::startup) {
        Ok(Ok(())) => {
            tracing::info!("Main thread ID: {:?}", std::thread::current().id());
            true
        }
        Ok(Err(e)) => {
            tracing::error!("Startup failed: {}", e);
            false
        }
        Err(_) => {
            console::error("Panic during startup");
            false
        }
    }
}

/// Called when FLHook unloads the plugin
#[no_mangle]
#[instrument(skip_all)]
pub extern "C" fn flhook_shutdown() {
    if catch_unwind(flhook_core::shutdown).is_err() {
        console::add_log("Error closing FLHook script!");
    }
}

/// Called from every host hook
///
/// Takes ownership of `data`. Returns a [`PluginReturnCode`].
///
/// # Safety
/// - `event` must be a valid NUL-terminated string
/// - `data` must be null or an owned value
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn flhook_callback(event: *const c_char, data: *mut Value) -> c_int {
    let default = PluginReturnCode::Default.raw() as c_int;
    let data = take(data);

    let Some(event) = c_str(event) else {
        console::error("ERROR callback got a NULL event name");
        return default;
    };

    let Some(data) = data else {
        console::error(&format!("ERROR ({}) got NULL data", event));
        return default;
    };

    match catch_unwind(AssertUnwindSafe(|| flhook_core::callback(&event, &data))) {
        Ok(code) => code.raw() as c_int,
        Err(_) => {
            console::add_log(&format!("Exception in callback ({})", event));
            default
        }
    }
}

/// Build a value record from positional fields
///
/// Takes ownership of `args` (a tuple, or a single value for one-field
/// records). Returns null on error.
///
/// # Safety
/// - `type_name` must be a valid NUL-terminated string
/// - `args` must be null or an owned value
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn flhook_convert_record(
    type_name: *const c_char,
    args: *mut Value,
) -> *mut Value {
    let args = match take(args) {
        Some(Value::Tuple(items)) => items,
        Some(other) => vec![other],
        None => Vec::new(),
    };

    let Some(type_name) = c_str(type_name) else {
        return std::ptr::null_mut();
    };

    match convert_record(&type_name, args) {
        Ok(record) => into_raw(Value::Record(record)),
        Err(e) => {
            console::error(&format!("convert_record({}) failed: {}", type_name, e));
            std::ptr::null_mut()
        }
    }
}

/// Wrap a host object in a live proxy
///
/// Returns null on error.
///
/// # Safety
/// - `type_name` must be a valid NUL-terminated string
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn flhook_convert_proxy(
    type_name: *const c_char,
    handle: *mut c_void,
) -> *mut Value {
    let Some(type_name) = c_str(type_name) else {
        return std::ptr::null_mut();
    };

    match convert_proxy(&type_name, Handle::from_ptr(handle)) {
        Ok(proxy) => into_raw(Value::Object(proxy)),
        Err(e) => {
            console::error(&format!("convert_proxy({}) failed: {}", type_name, e));
            std::ptr::null_mut()
        }
    }
}
