//! crates/logger/src/event.rs
//! The event handed to global subscribers.

use super::levels::Severity;

/// One log call: a severity paired with its message text.
///
/// Events are built by [`Logger::log`](crate::Logger::log) and passed by
/// reference to global subscribers. They are never buffered by the logger.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEvent {
    level: Severity,
    message: String,
}

impl LogEvent {
    /// Creates an event for `level` carrying `message`.
    #[must_use]
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Severity the message was logged at.
    #[must_use]
    pub const fn level(&self) -> Severity {
        self.level
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the event and returns its severity and message.
    #[must_use]
    pub fn into_parts(self) -> (Severity, String) {
        (self.level, self.message)
    }
}
