//! Host callback dispatch
//!
//! Every host hook funnels into [`callback`] with an event name and a
//! payload. The dispatcher logs the event (unless suppressed) and tells the
//! host to carry on.

use flhook_sdk::{PluginReturnCode, Value};

use super::filter::{filter, EventFilter};
use crate::console;
use crate::lifecycle::is_enabled;

/// Format the log line for an event
pub fn format_event(event: &str, data: &Value) -> String {
    format!("Python Got: {} : {}", event, data)
}

/// Dispatch one event against `filter`, emitting lines to `emit`
pub fn dispatch<F>(filter: &EventFilter, event: &str, data: &Value, mut emit: F) -> PluginReturnCode
where
    F: FnMut(&str),
{
    if filter.should_log(event) {
        emit(&format_event(event, data));
    }
    PluginReturnCode::Default
}

/// Handle a host-issued event
///
/// Logs `"Python Got: <event> : <data>"` to the host console unless the
/// event is suppressed. Always returns [`PluginReturnCode::Default`]; a
/// disabled plugin does nothing else.
pub fn callback(event: &str, data: &Value) -> PluginReturnCode {
    if !is_enabled() {
        tracing::trace!("Plugin disabled, ignoring {}", event);
        return PluginReturnCode::Default;
    }

    if !flhook_engine::is_main_thread() {
        tracing::debug!("Event {} dispatched off the host thread", event);
    }

    dispatch(filter(), event, data, console::logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::testing;
    use crate::proxy::{HostClass, Vector};

    #[test]
    fn test_suppressed_event_emits_nothing() {
        let mut lines = Vec::new();
        let code = dispatch(
            &EventFilter::builtin(),
            "HkCbIServerImpl_Update",
            &Value::tuple([1, 2]),
            |line| lines.push(line.to_string()),
        );

        assert_eq!(code, PluginReturnCode::Default);
        assert_eq!(code.raw(), 0);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_unsuppressed_event_emits_one_line() {
        let mut lines = Vec::new();
        let data = Value::tuple([Value::Int(7), Value::from("hi")]);
        let code = dispatch(&EventFilter::builtin(), "PlayerLaunch", &data, |line| {
            lines.push(line.to_string())
        });

        assert_eq!(code.raw(), 0);
        assert_eq!(lines, vec!["Python Got: PlayerLaunch : (7, 'hi')".to_string()]);
    }

    #[test]
    fn test_payload_rendering() {
        assert_eq!(
            format_event("HkCbIServerImpl_OnConnect", &Value::tuple([3])),
            "Python Got: HkCbIServerImpl_OnConnect : (3,)"
        );
        assert_eq!(
            format_event("HkCbIServerImpl_Update", &Value::None),
            "Python Got: HkCbIServerImpl_Update : None"
        );

        let vector = Value::Object(std::sync::Arc::new(Vector::from_handle(
            flhook_sdk::Handle::from_raw(0x10),
        )));
        assert_eq!(
            format_event("E", &vector),
            "Python Got: E : <Vector object at 0x10>"
        );
    }

    #[test]
    fn test_callback_writes_to_host_console() {
        testing::install();
        let _guard = testing::lifecycle_lock();
        crate::lifecycle::set_enabled(true);

        let suppressed = Value::from("frame-tick-payload");
        let shown = Value::tuple([Value::from("launch-payload")]);

        assert_eq!(callback("HkCbIServerImpl_Update", &suppressed).raw(), 0);
        assert_eq!(callback("PlayerLaunch", &shown).raw(), 0);

        let lines = testing::console_lines();
        assert!(!lines.iter().any(|l| l.contains("frame-tick-payload")));
        let launch: Vec<_> = lines.iter().filter(|l| l.contains("launch-payload")).collect();
        assert_eq!(launch, vec!["Python Got: PlayerLaunch : ('launch-payload',)\n"]);
    }

    #[test]
    fn test_disabled_plugin_logs_nothing() {
        testing::install();
        let _guard = testing::lifecycle_lock();
        crate::lifecycle::set_enabled(false);

        let data = Value::from("disabled-payload");
        assert_eq!(callback("PlayerLaunch", &data), PluginReturnCode::Default);
        assert!(!testing::console_lines()
            .iter()
            .any(|l| l.contains("disabled-payload")));

        crate::lifecycle::set_enabled(true);
    }
}
