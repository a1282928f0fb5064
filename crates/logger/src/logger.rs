//! crates/logger/src/logger.rs
//! The dispatcher: per-level handlers, threshold-filtered subscribers.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::config::{
    ConfigError, ConfigSource, DEFAULT_LOG_LEVEL, EnvConfig, configured_threshold,
};
use super::diagnostics::{self, ThresholdOrigin};
use super::event::LogEvent;
use super::levels::Severity;
use super::registry::{HandlerId, ListenerList};

/// Handler bound to a single severity; receives the message text only.
pub type MessageHandler = dyn Fn(&str) + Send + Sync;

/// Subscriber to the filtered event stream; receives the whole event.
pub type EventHandler = dyn Fn(&LogEvent) + Send + Sync;

struct Listeners {
    next_id: u64,
    per_level: [ListenerList<MessageHandler>; Severity::COUNT],
    global: ListenerList<EventHandler>,
}

impl Listeners {
    fn new() -> Self {
        Self {
            next_id: 0,
            per_level: std::array::from_fn(|_| ListenerList::new()),
            global: ListenerList::new(),
        }
    }

    /// Hands out the next token. Called under the same lock as the push, so
    /// list order always matches token order.
    fn allocate_id(&mut self) -> HandlerId {
        let id = HandlerId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Leveled logger dispatching messages to registered handlers.
///
/// Every call to [`log`](Self::log) first runs the handlers registered for that
/// exact severity, then, if the severity meets the logger's threshold, the
/// global subscribers. Handlers run synchronously, in registration order, on
/// the calling thread.
///
/// The handler lists are snapshotted when `log` starts and the internal lock is
/// released before any handler runs. Handlers may therefore log, subscribe, or
/// unsubscribe (including themselves) without deadlocking; such changes apply
/// from the next `log` call on.
///
/// A panicking handler unwinds out of `log`. Handlers registered after it are
/// skipped for that call, and the registry is left intact.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logger::{LogEvent, Logger, Severity};
///
/// let logger = Logger::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// logger.subscribe(move |event: &LogEvent| {
///     sink.lock().unwrap().push(event.clone());
/// });
///
/// logger.log(Severity::Debug, "below the default threshold");
/// logger.log(Severity::Warn, "disk almost full");
///
/// let seen = seen.lock().unwrap();
/// assert_eq!(seen.as_slice(), [LogEvent::new(Severity::Warn, "disk almost full")]);
/// ```
pub struct Logger {
    threshold: Severity,
    listeners: Mutex<Listeners>,
}

impl Logger {
    /// Creates a logger with the default threshold ([`Severity::Info`]).
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_LOG_LEVEL, ThresholdOrigin::Default)
    }

    /// Creates a logger whose global subscribers receive events at or above
    /// `threshold`.
    #[must_use]
    pub fn with_threshold(threshold: Severity) -> Self {
        Self::build(threshold, ThresholdOrigin::Explicit)
    }

    /// Creates a logger whose threshold is read from
    /// [`CONFIG_LEVEL_KEY`](crate::CONFIG_LEVEL_KEY) in `source`.
    ///
    /// An absent key yields [`DEFAULT_LOG_LEVEL`]. A present value that is not
    /// one of the five severity labels fails with [`ConfigError`].
    ///
    /// ```
    /// use logger::{Logger, Severity};
    ///
    /// let logger = Logger::from_config(&[("log_level", "debug")]).unwrap();
    /// assert_eq!(logger.current_log_level(), Severity::Debug);
    ///
    /// let err = Logger::from_config(&[("log_level", "verbose")]).unwrap_err();
    /// assert_eq!(err.value(), "verbose");
    /// ```
    pub fn from_config<C: ConfigSource + ?Sized>(source: &C) -> Result<Self, ConfigError> {
        Ok(match configured_threshold(source)? {
            Some(threshold) => Self::build(threshold, ThresholdOrigin::Configured),
            None => Self::new(),
        })
    }

    /// Creates a logger configured from the `LOG_LEVEL` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&EnvConfig::new())
    }

    fn build(threshold: Severity, origin: ThresholdOrigin) -> Self {
        diagnostics::threshold_resolved(threshold, origin);
        Self {
            threshold,
            listeners: Mutex::new(Listeners::new()),
        }
    }

    /// Returns the threshold resolved at construction.
    #[must_use]
    pub const fn current_log_level(&self) -> Severity {
        self.threshold
    }

    /// Dispatches `message` at `level`.
    ///
    /// Handlers registered for `level` always run. Global subscribers run only
    /// when `level` meets [`current_log_level`](Self::current_log_level).
    pub fn log(&self, level: Severity, message: &str) {
        let (level_handlers, subscribers) = {
            let listeners = self.listeners();
            let subscribers = if level.meets(self.threshold) {
                listeners.global.snapshot()
            } else {
                Vec::new()
            };
            (listeners.per_level[level.index()].snapshot(), subscribers)
        };

        for handler in &level_handlers {
            handler(message);
        }

        if subscribers.is_empty() {
            return;
        }
        let event = LogEvent::new(level, message);
        for subscriber in &subscribers {
            subscriber(&event);
        }
    }

    /// Registers `handler` for messages logged at exactly `level`.
    ///
    /// Registering the same logic twice produces two independent registrations,
    /// each invoked once per matching message.
    pub fn add_level_handler<F>(&self, level: Severity, handler: F) -> HandlerId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.add_shared_level_handler(level, Arc::new(handler))
    }

    /// Registers an already shared handler for `level`.
    ///
    /// The same `Arc` may be registered any number of times; every
    /// registration gets its own [`HandlerId`].
    pub fn add_shared_level_handler(
        &self,
        level: Severity,
        handler: Arc<MessageHandler>,
    ) -> HandlerId {
        let id = {
            let mut listeners = self.listeners();
            let id = listeners.allocate_id();
            listeners.per_level[level.index()].push(id, handler);
            id
        };
        diagnostics::handler_added(Some(level), id);
        id
    }

    /// Removes the registration `id` from `level`.
    ///
    /// Returns `false`, and changes nothing, when `id` is not registered for
    /// `level`.
    pub fn remove_level_handler(&self, level: Severity, id: HandlerId) -> bool {
        let removed = self.listeners().per_level[level.index()].remove(id);
        diagnostics::handler_removed(Some(level), id, removed);
        removed
    }

    /// Subscribes `handler` to every event meeting the threshold.
    pub fn subscribe<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&LogEvent) + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(handler))
    }

    /// Subscribes an already shared handler; see [`subscribe`](Self::subscribe).
    pub fn subscribe_shared(&self, handler: Arc<EventHandler>) -> HandlerId {
        let id = {
            let mut listeners = self.listeners();
            let id = listeners.allocate_id();
            listeners.global.push(id, handler);
            id
        };
        diagnostics::handler_added(None, id);
        id
    }

    /// Removes the global subscription `id`. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let removed = self.listeners().global.remove(id);
        diagnostics::handler_removed(None, id, removed);
        removed
    }

    /// Number of handlers currently registered for `level`.
    #[must_use]
    pub fn level_handler_count(&self, level: Severity) -> usize {
        self.listeners().per_level[level.index()].len()
    }

    /// Number of current global subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners().global.len()
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners();
        let per_level: Vec<(Severity, usize)> = Severity::ALL
            .into_iter()
            .map(|level| (level, listeners.per_level[level.index()].len()))
            .collect();
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("level_handlers", &per_level)
            .field("subscribers", &listeners.global.len())
            .finish()
    }
}
