//! crates/logger/src/tracing_bridge.rs
//! Bridge from the tracing crate into a [`Logger`].
//!
//! [`LoggerLayer`] is a tracing-subscriber layer that forwards every tracing
//! event to a shared logger, so code instrumented with the standard `trace!`,
//! `debug!`, `info!`, `warn!`, and `error!` macros reaches the logger's
//! handlers and subscribers.
//!
//! # Mapping
//!
//! | tracing level | severity   |
//! |---------------|------------|
//! | `ERROR`       | `critical` |
//! | `WARN`        | `warn`     |
//! | `INFO`        | `info`     |
//! | `DEBUG`       | `debug`    |
//! | `TRACE`       | `trace`    |
//!
//! Only the event's `message` field is forwarded. Events without one, and the
//! crate's own diagnostics (the exact targets in
//! [`INTERNAL_TARGETS`](crate::INTERNAL_TARGETS)), are dropped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logger::{Logger, init_tracing};
//!
//! let logger = Arc::new(Logger::new());
//! logger.subscribe(|event| println!("{}: {}", event.level(), event.message()));
//! init_tracing(Arc::clone(&logger));
//!
//! tracing::warn!("disk almost full");
//! ```

use std::sync::Arc;

use super::diagnostics::is_internal_target;
use super::levels::Severity;
use super::logger::Logger;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that forwards events to a [`Logger`].
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Create a layer feeding `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// The logger events are forwarded to.
    #[must_use]
    pub const fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Map a tracing level to a severity.
    #[must_use]
    pub const fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Critical,
            Level::WARN => Severity::Warn,
            Level::INFO => Severity::Info,
            Level::DEBUG => Severity::Debug,
            Level::TRACE => Severity::Trace,
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal_target(metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.logger.log(Self::severity_for(metadata.level()), &message);
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global tracing subscriber that forwards events to `logger`.
///
/// Panics if a global default subscriber has already been set, like
/// [`SubscriberInitExt::init`](tracing_subscriber::util::SubscriberInitExt::init).
pub fn init_tracing(logger: Arc<Logger>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .init();
}

/// Install a global tracing subscriber with an extra filter layer in front of
/// the logger bridge.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use logger::{Logger, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// let logger = Arc::new(Logger::new());
/// init_tracing_with_filter(logger, EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(logger: Arc<Logger>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .init();
}
