//! Script-visible output channels
//!
//! Text goes to the host's console and log file when the host supplied
//! them, and to `tracing` otherwise.

/// Print text on the host console (`ConPrint`)
pub fn con_print(text: &str) {
    let delivered = flhook_engine::try_host()
        .map(|host| host.con_print(text))
        .unwrap_or(false);

    if !delivered {
        tracing::info!(target: "flhook::console", "{}", text.trim_end());
    }
}

/// Append a line to the host log file (`AddLog`)
pub fn add_log(text: &str) {
    let delivered = flhook_engine::try_host()
        .map(|host| host.add_log(text))
        .unwrap_or(false);

    if !delivered {
        tracing::info!(target: "flhook::log", "{}", text);
    }
}

/// Print one console line
pub fn logger(text: &str) {
    con_print(&format!("{}\n", text));
}

/// Report an error on both the console and the log file
pub fn error(text: &str) {
    tracing::error!("{}", text);
    con_print(&format!("{}\n", text));
    add_log(text);
}
