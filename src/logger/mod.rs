//! Structured logging for the trade relay
//!
//! Tag-based logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Colored console output (stdout, or stderr in one-shot invoke mode)
//!
//! ## Usage
//!
//! ```ignore
//! use trade_relay::logger::{self, LogTag};
//!
//! logger::error(LogTag::Broker, "Order submission failed");
//! logger::info(LogTag::Handler, "Received event");
//! logger::debug(LogTag::Broker, "Request payload: ..."); // Only if --debug-broker
//! logger::verbose(LogTag::Request, "Raw event: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after parsing arguments:
//! ```ignore
//! logger::init(trade_relay::logger::LoggerConfig::default());
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Installs the given configuration. Logging before `init` uses defaults
/// (Info level, stdout, no debug tags).
pub fn init(config: LoggerConfig) {
    set_logger_config(config);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the --debug-<tag> flag for this tag was provided.
///
/// # Example
/// ```ignore
/// // Only shown with --debug-broker
/// logger::debug(LogTag::Broker, "Response headers: {...}");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
