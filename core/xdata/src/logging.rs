//! FILENAME: core/xdata/src/logging.rs
// PURPOSE: Category-tagged logging for the mutation protocol.
// CONTEXT: Lines are formatted as `seq|category|message` and handed to the
// `log` facade under the `xdata` target. The library never installs a
// logger; the embedding application decides where the lines go.

use std::sync::atomic::{AtomicU64, Ordering};

use log::Level;

/// Log target used for every line emitted by this crate.
pub const LOG_TARGET: &str = "xdata";

/// Global sequence counter, so interleaved lines can be re-ordered later
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Format a log line in unified format
pub fn format_line(seq: u64, category: &str, message: &str) -> String {
    format!("{}|{}|{}", seq, category, message)
}

/// Write a log line in unified format
pub fn write_log(level: Level, category: &str, message: &str) {
    if !log::log_enabled!(target: LOG_TARGET, level) {
        return;
    }
    let line = format_line(next_seq(), category, message);
    log::log!(target: LOG_TARGET, level, "{}", line);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Warn, $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_enter;
pub use log_exit;
pub use log_info;
pub use log_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_increasing() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(7, "HEADER", "widened 'prices'"), "7|HEADER|widened 'prices'");
    }

    #[test]
    fn test_macros_without_logger() {
        // No logger installed: the calls must be silent no-ops.
        log_debug!("TEST", "value={}", 1);
        log_enter!("TEST", "update", "axis={}", 2);
        log_exit!("TEST", "update");
    }
}
