//! In-process stub host for tests
//!
//! Binds every class function the registered proxy types need to a shared
//! field store, binds every host command to a scriptable reply table, and
//! records each call so tests can check exactly what was forwarded. The engine globals are write-once, so the stub is installed
//! once per test binary; tests isolate themselves with [`fresh_handle`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Once};

use dashmap::{DashMap, DashSet};
use flhook_engine::{ClassFn, CommandFn, HostGlobals};
use flhook_sdk::{Handle, Value};
use parking_lot::Mutex;

use super::registry::required_host_functions;

/// One forwarded host call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: &'static str,
    pub handle: Handle,
    pub index: u32,
    pub args: Value,
}

impl Call {
    pub fn new(function: &'static str, handle: Handle, index: u32, args: Value) -> Self {
        Self {
            function,
            handle,
            index,
            args,
        }
    }
}

static INSTALL: Once = Once::new();
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(0x1000);

static FIELDS: LazyLock<DashMap<(Handle, u32), Value>> = LazyLock::new(DashMap::new);
static CALLS: LazyLock<DashMap<Handle, Vec<Call>>> = LazyLock::new(DashMap::new);
static COMMAND_CALLS: LazyLock<DashMap<&'static str, Vec<Value>>> = LazyLock::new(DashMap::new);
static COMMAND_REPLIES: LazyLock<DashMap<(&'static str, String), (u32, Value)>> =
    LazyLock::new(DashMap::new);
static FAILING: LazyLock<DashSet<Handle>> = LazyLock::new(DashSet::new);
static CONSOLE: LazyLock<Mutex<Vec<String>>> = LazyLock::new(|| Mutex::new(Vec::new()));
static LOG: LazyLock<Mutex<Vec<String>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// Bind the stub host (idempotent)
pub fn install() {
    INSTALL.call_once(|| {
        let mut globals = HostGlobals::new()
            .with_console(Some(Box::new(|text: &str| CONSOLE.lock().push(text.to_string()))))
            .with_log(Some(Box::new(|text: &str| LOG.lock().push(text.to_string()))));

        for name in required_host_functions() {
            globals = globals.with_class_function(name, stub(name));
        }
        for name in crate::commands::command_names() {
            globals = globals.with_command(name, stub_command(name));
        }

        // A host bound elsewhere in this binary wins
        let _ = flhook_engine::init_host(globals);
    });
}

/// A handle no other test uses
pub fn fresh_handle() -> Handle {
    Handle::from_raw(NEXT_HANDLE.fetch_add(0x10, Ordering::Relaxed))
}

/// Make the next host call on `handle` report failure
pub fn fail_next(handle: Handle) {
    FAILING.insert(handle);
}

/// Preload a field value as if the host object held it
pub fn seed(handle: Handle, index: u32, value: Value) {
    FIELDS.insert((handle, index), value);
}

/// Every call forwarded for `handle`, in order
pub fn calls(handle: Handle) -> Vec<Call> {
    CALLS
        .get(&handle)
        .map(|calls| calls.clone())
        .unwrap_or_default()
}

/// Make `command` reply with `code` and `reply` when called with exactly `args`
///
/// Unscripted calls succeed with `None`.
pub fn script_command(command: &'static str, args: Value, code: u32, reply: Value) {
    COMMAND_REPLIES.insert((command, args.repr()), (code, reply));
}

/// Argument tuples `command` was called with, in order
pub fn command_calls(command: &str) -> Vec<Value> {
    COMMAND_CALLS
        .get(command)
        .map(|calls| calls.clone())
        .unwrap_or_default()
}

/// Lines written to the host console so far
pub fn console_lines() -> Vec<String> {
    CONSOLE.lock().clone()
}

/// Lines written to the host log so far
pub fn log_lines() -> Vec<String> {
    LOG.lock().clone()
}

fn stub(function: &'static str) -> ClassFn {
    Arc::new(move |handle: Handle, index: u32, args: Value| {
        CALLS
            .entry(handle)
            .or_default()
            .push(Call::new(function, handle, index, args.clone()));

        if FAILING.remove(&handle).is_some() {
            return None;
        }

        if function.ends_with("_GetAttr") {
            Some(
                FIELDS
                    .get(&(handle, index))
                    .map(|v| v.clone())
                    .unwrap_or_default(),
            )
        } else if function.ends_with("_SetAttr") {
            let value = args.as_tuple()?.first()?.clone();
            FIELDS.insert((handle, index), value);
            Some(Value::None)
        } else {
            // Method dispatch echoes what it was asked to do
            Some(Value::Tuple(vec![Value::Int(index as i64), args]))
        }
    })
}

fn stub_command(command: &'static str) -> CommandFn {
    Arc::new(move |args: Value| {
        COMMAND_CALLS.entry(command).or_default().push(args.clone());

        COMMAND_REPLIES
            .get(&(command, args.repr()))
            .map(|reply| reply.clone())
            .unwrap_or((0, Value::None))
    })
}

static LIFECYCLE: Mutex<()> = parking_lot::const_mutex(());

/// Serialize tests that flip the process-wide enabled flag
pub fn lifecycle_lock() -> parking_lot::MutexGuard<'static, ()> {
    LIFECYCLE.lock()
}
