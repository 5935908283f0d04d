//! Logging utilities
//!
//! Thin helpers over the `log` facade so battle code logs with a consistent
//! shape. The binary decides where records go.

const TARGET: &str = "chimera";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{msg}");
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{msg}");
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{label}] {msg}");
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::info!(target: TARGET, "{name}: {details}");
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::info!(target: TARGET, "ok: {msg}");
    } else {
        ::log::warn!(target: TARGET, "failed: {msg}");
    }
}
