//! Global host function storage
//!
//! Host functions are bound once during plugin load and stored here.
//! Access is thread-safe via OnceLock; nothing is mutated after binding.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use flhook_sdk::{Handle, Value};

use crate::error::BindError;

/// Host text sink (console print or log file line)
pub type SinkFn = Box<dyn Fn(&str) + Send + Sync>;

/// Host class function: `(handle, index, args) -> result`
///
/// The same shape backs get, set and call functions. `index` is a field
/// index for get/set and a method id for call. `None` means the host
/// reported failure.
pub type ClassFn = Arc<dyn Fn(Handle, u32, Value) -> Option<Value> + Send + Sync>;

/// Host command: `args -> (HK_ERROR code, reply)`
///
/// `args` is the positional argument tuple. The reply is `None` for
/// commands that return nothing or fail.
pub type CommandFn = Arc<dyn Fn(Value) -> (u32, Value) + Send + Sync>;

/// Global host state containing every bound function
pub struct HostGlobals {
    /// Console print sink (`ConPrint`)
    console: Option<SinkFn>,

    /// Log file sink (`AddLog`)
    log: Option<SinkFn>,

    /// Class functions keyed by their host-side name (e.g. "Vector_GetAttr")
    class_functions: HashMap<&'static str, ClassFn>,

    /// Host commands keyed by name (e.g. "HkMsg")
    commands: HashMap<&'static str, CommandFn>,

    /// Thread that bound the host, for thread checks
    pub main_thread_id: ThreadId,
}

/// Global host state storage
static HOST: OnceLock<HostGlobals> = OnceLock::new();

/// Initialize host globals
///
/// Called once during plugin load. Returns error if already initialized.
pub fn init_host(globals: HostGlobals) -> Result<(), BindError> {
    HOST.set(globals).map_err(|_| BindError::AlreadyInitialized)
}

/// Get host globals, or None before the host is bound
pub fn try_host() -> Option<&'static HostGlobals> {
    HOST.get()
}

/// Check if current thread is the thread that bound the host
pub fn is_main_thread() -> bool {
    HOST.get()
        .map(|g| std::thread::current().id() == g.main_thread_id)
        .unwrap_or(false)
}

impl HostGlobals {
    /// Create empty HostGlobals owned by the current thread
    pub fn new() -> Self {
        Self {
            console: None,
            log: None,
            class_functions: HashMap::new(),
            commands: HashMap::new(),
            main_thread_id: std::thread::current().id(),
        }
    }

    /// Set the console print sink
    pub fn with_console(mut self, sink: Option<SinkFn>) -> Self {
        self.console = sink;
        self
    }

    /// Set the log file sink
    pub fn with_log(mut self, sink: Option<SinkFn>) -> Self {
        self.log = sink;
        self
    }

    /// Add a class function under its host-side name
    pub fn with_class_function(mut self, name: &'static str, function: ClassFn) -> Self {
        self.class_functions.insert(name, function);
        self
    }

    /// Look up a class function by host-side name
    pub fn class_function(&self, name: &str) -> Option<&ClassFn> {
        self.class_functions.get(name)
    }

    /// Number of bound class functions
    pub fn class_function_count(&self) -> usize {
        self.class_functions.len()
    }

    /// Add a host command under its name
    pub fn with_command(mut self, name: &'static str, command: CommandFn) -> Self {
        self.commands.insert(name, command);
        self
    }

    /// Look up a host command by name
    pub fn command(&self, name: &str) -> Option<&CommandFn> {
        self.commands.get(name)
    }

    /// Number of bound host commands
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Write a line to the host console
    ///
    /// Returns false when the host supplied no console sink.
    pub fn con_print(&self, text: &str) -> bool {
        match &self.console {
            Some(sink) => {
                sink(text);
                true
            }
            None => false,
        }
    }

    /// Write a line to the host log file
    ///
    /// Returns false when the host supplied no log sink.
    pub fn add_log(&self, text: &str) -> bool {
        match &self.log {
            Some(sink) => {
                sink(text);
                true
            }
            None => false,
        }
    }
}

impl Default for HostGlobals {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostGlobals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.class_functions.keys().collect();
        names.sort();
        let mut commands: Vec<_> = self.commands.keys().collect();
        commands.sort();
        f.debug_struct("HostGlobals")
            .field("console", &self.console.is_some())
            .field("log", &self.log.is_some())
            .field("class_functions", &names)
            .field("commands", &commands)
            .field("main_thread_id", &self.main_thread_id)
            .finish()
    }
}
