#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logger` is a small leveled event logger. Callers emit messages tagged with
//! a [`Severity`]; interested code registers closures either for one exact
//! severity or for the stream of every event that meets the logger's
//! threshold. The crate never renders or writes anything itself: all output is
//! the business of the registered handlers.
//!
//! # Design
//!
//! A [`Logger`] owns an immutable threshold, one ordered handler list per
//! severity, and one ordered list of global subscribers. [`Logger::log`]
//!
//! 1. runs every handler registered for that exact severity, passing the
//!    message text, then
//! 2. if the severity meets the threshold, runs every global subscriber,
//!    passing a [`LogEvent`].
//!
//! Each registration returns a [`HandlerId`] that removes exactly that
//! registration later. Registering the same handler twice yields two
//! registrations and two invocations per matching message.
//!
//! # Invariants
//!
//! - The threshold is fixed at construction; nothing changes it afterwards.
//! - Per-level handlers ignore the threshold entirely.
//! - Handlers run synchronously on the caller's thread, in registration order,
//!   against a snapshot taken when `log` starts.
//! - No handler ever runs while the registry lock is held.
//!
//! # Errors
//!
//! Building a logger from configuration fails with [`ConfigError`] when the
//! `log_level` key holds anything other than `trace`, `debug`, `info`, `warn`,
//! or `critical`. An absent key means `info`. Logging itself cannot fail; a
//! panicking handler unwinds out of [`Logger::log`] and skips the handlers
//! after it for that call.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logger::{LogEvent, Logger, Severity};
//!
//! let logger = Logger::from_config(&[("log_level", "info")]).unwrap();
//!
//! let everything = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&everything);
//! logger.subscribe(move |event: &LogEvent| {
//!     sink.lock().unwrap().push((event.level(), event.message().to_owned()));
//! });
//!
//! let info_only = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&info_only);
//! logger.add_level_handler(Severity::Info, move |message| {
//!     sink.lock().unwrap().push(message.to_owned());
//! });
//!
//! logger.log(Severity::Trace, "a");
//! logger.log(Severity::Info, "b");
//! logger.log(Severity::Critical, "c");
//!
//! assert_eq!(
//!     *everything.lock().unwrap(),
//!     [(Severity::Info, "b".to_owned()), (Severity::Critical, "c".to_owned())]
//! );
//! assert_eq!(*info_only.lock().unwrap(), ["b"]);
//! ```
//!
//! # Features
//!
//! - `serde`: serialization for [`Severity`] and [`LogEvent`], plus the
//!   deserializable `LoggerSettings` configuration source.
//! - `tracing`: the `LoggerLayer` bridge that feeds `tracing` events into a
//!   logger, and the crate's own diagnostics on the `logger::config` and
//!   `logger::registry` targets.

mod config;
mod diagnostics;
mod event;
mod levels;
mod logger;
mod macros;
mod registry;
#[cfg(feature = "tracing")]
mod tracing_bridge;

#[cfg(feature = "serde")]
pub use config::LoggerSettings;
pub use config::{
    CONFIG_LEVEL_KEY, ConfigError, ConfigSource, DEFAULT_LOG_LEVEL, EnvConfig, NoConfig,
    resolve_threshold,
};
pub use diagnostics::{INTERNAL_TARGETS, is_internal_target};
pub use event::LogEvent;
pub use levels::{ParseSeverityError, Severity};
pub use logger::{EventHandler, Logger, MessageHandler};
pub use registry::HandlerId;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing, init_tracing_with_filter};
