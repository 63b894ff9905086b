//! Debug logging utilities.

use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug logging for one hook invocation
pub fn init_debug(enabled: bool, hook: &str) {
    let _ = DEBUG_ENABLED.set(enabled);
    if enabled {
        // Hooks run many times per session, so the log is appended to, never cleared
        if let Some(path) = debug_log_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            append_line(
                &path,
                &format!(
                    "=== {} (pid {}) started at {} ===",
                    hook,
                    std::process::id(),
                    Utc::now().to_rfc3339()
                ),
            );
        }
    }
}

/// Get the path to the debug log file
pub fn debug_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|c| c.join("claude-observability-hooks").join("debug.log"))
}

/// Check if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&false)
}

/// Write a debug log message
pub fn debug_log(msg: &str) {
    if is_debug_enabled() {
        if let Some(path) = debug_log_path() {
            let timestamp = Utc::now().format("%H:%M:%S%.3f");
            append_line(&path, &format!("[{}] {}", timestamp, msg));
        }
    }
}

fn append_line(path: &PathBuf, line: &str) {
    if let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}
