//! crates/logger/src/macros.rs
//! Convenience macros that format a message and log it at a fixed severity.
//!
//! Formatting happens at the call site; the logger only ever sees the final
//! text.

/// Log a formatted message at [`Severity::Trace`](crate::Severity::Trace).
///
/// # Example
/// ```
/// let logger = logger::Logger::new();
/// logger::log_trace!(logger, "entering {}", "setup");
/// ```
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Trace, &::std::format!($($arg)*))
    };
}

/// Log a formatted message at [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Debug, &::std::format!($($arg)*))
    };
}

/// Log a formatted message at [`Severity::Info`](crate::Severity::Info).
///
/// # Example
/// ```
/// let logger = logger::Logger::new();
/// let files = 3;
/// logger::log_info!(logger, "loaded {files} files");
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Info, &::std::format!($($arg)*))
    };
}

/// Log a formatted message at [`Severity::Warn`](crate::Severity::Warn).
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Warn, &::std::format!($($arg)*))
    };
}

/// Log a formatted message at [`Severity::Critical`](crate::Severity::Critical).
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Critical, &::std::format!($($arg)*))
    };
}
