//! Logging for the scene graph engine
//!
//! Entries go through the global sink in [`Engine`](crate::scenegraph::Engine);
//! the default sink prints colored lines to stdout. Error entries carry the
//! file and line they were raised from.

use std::fmt::Display;
use std::time::SystemTime;
use chrono::{DateTime, Local};
use colored::*;

/// Sink for log entries.
///
/// ```no_run
/// use scene_graph_engine::scenegraph::log::{Logger, LogEntry};
///
/// struct FrameLogger;
///
/// impl Logger for FrameLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, e.g. "scenegraph::RenderLoop"
    pub source: String,
    pub message: String,
    /// Set for ERROR entries only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Ordered from most to least verbose; the global threshold filters below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-tick details
    Trace,
    /// Skipped bindings, recomputation counts
    Debug,
    /// Lifecycle events (loop started/stopped, assets attached)
    Info,
    /// Recoverable problems (invalid viewport)
    Warn,
    /// Structural errors and render failures
    Error,
}

impl LogSeverity {
    /// Fixed-width label, so messages line up
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn colored_label(&self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

/// Console sink: `[timestamp] [SEVERITY] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// One line per entry, without colors
    pub fn format_plain(entry: &LogEntry) -> String {
        render_line(entry, entry.severity.label(), &entry.source)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", render_line(entry, entry.severity.colored_label(), entry.source.bright_blue()));
    }
}

fn render_line(entry: &LogEntry, severity: impl Display, source: impl Display) -> String {
    let datetime: DateTime<Local> = entry.timestamp.into();
    let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");
    let mut line = format!("[{}] [{}] [{}] {}", timestamp, severity, source, entry.message);
    if let (Some(file), Some(line_no)) = (entry.file, entry.line) {
        line.push_str(&format!(" ({}:{})", file, line_no));
    }
    line
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::scenegraph::Engine::log(
            $crate::scenegraph::log::LogSeverity::$severity,
            $source,
            format!($($arg)*)
        )
    };
}

/// ```ignore
/// engine_trace!("scenegraph::RenderLoop", "tick {} at {:.3}s", n, t);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Trace, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Debug, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Info, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Warn, $source, $($arg)*) };
}

/// Logs with the caller's file:line attached
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::scenegraph::Engine::log_detailed(
            $crate::scenegraph::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
