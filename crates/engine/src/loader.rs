//! Host function binding via name-resolving factories

use crate::error::BindError;
use crate::globals::{ClassFn, CommandFn, HostGlobals, SinkFn};

/// Wrapper around a host function resolver
///
/// The resolver maps a host-side function name (e.g. "Vector_GetAttr") to a
/// callable, the same way a CreateInterface factory maps version strings.
pub struct FunctionFactory<F> {
    resolve: F,
    name: &'static str,
}

impl<F> FunctionFactory<F> {
    /// Create a new factory wrapper
    ///
    /// # Arguments
    /// * `resolve` - Resolver returning the host function for a name
    /// * `name` - Human-readable name for error messages (e.g., "FLHookClasses")
    pub fn new(resolve: F, name: &'static str) -> Self {
        Self { resolve, name }
    }

    /// Get a function by name
    pub fn get<T>(&self, function: &str) -> Result<T, BindError>
    where
        F: Fn(&str) -> Option<T>,
    {
        (self.resolve)(function).ok_or_else(|| BindError::NotFound {
            function: function.to_string(),
            factory: self.name,
        })
    }

    /// Try to get a function, returning None on failure instead of error
    pub fn try_get<T>(&self, function: &str) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        (self.resolve)(function)
    }
}

/// Bind all host functions
///
/// Called during plugin load with the sinks and resolvers supplied by the
/// host. Class functions are required; commands are optional and a missing
/// one only fails when a script calls it.
///
/// # Arguments
/// * `console` - Console print sink
/// * `log` - Log file sink
/// * `classes` - Resolver for class functions
/// * `required` - Every class function a registered proxy type is wired to
/// * `commands` - Resolver for host commands
/// * `command_names` - Every command the script surface exposes
#[tracing::instrument(skip_all)]
pub fn load_host<C, M>(
    console: Option<SinkFn>,
    log: Option<SinkFn>,
    classes: &FunctionFactory<C>,
    required: &[&'static str],
    commands: &FunctionFactory<M>,
    command_names: &[&'static str],
) -> Result<HostGlobals, BindError>
where
    C: Fn(&str) -> Option<ClassFn>,
    M: Fn(&str) -> Option<CommandFn>,
{
    if console.is_none() {
        tracing::debug!("Host console sink: not available");
    }
    if log.is_none() {
        tracing::debug!("Host log sink: not available");
    }

    let mut globals = HostGlobals::new().with_console(console).with_log(log);

    // Required functions - fail if any are missing
    for &name in required {
        if globals.class_function(name).is_some() {
            continue;
        }
        let function = classes.get(name)?;
        tracing::info!("Bound host function {}", name);
        globals = globals.with_class_function(name, function);
    }

    // Optional commands - skip if not found
    let mut missing = 0usize;
    for &name in command_names {
        match commands.try_get(name) {
            Some(command) => globals = globals.with_command(name, command),
            None => {
                tracing::debug!("Host command {}: not available", name);
                missing += 1;
            }
        }
    }
    tracing::info!(
        "Bound {} host commands ({} missing)",
        globals.command_count(),
        missing
    );

    Ok(globals)
}
