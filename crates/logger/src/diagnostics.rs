//! crates/logger/src/diagnostics.rs
//! Internal tracing hooks for threshold resolution and registry changes.
//!
//! Every hook compiles to a no-op unless the `tracing` feature is enabled.
//! Every target is listed in [`INTERNAL_TARGETS`] so the tracing bridge can
//! skip them instead of feeding them back into a logger.

use super::levels::Severity;
use super::registry::HandlerId;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

const CONFIG_TARGET: &str = "logger::config";
const REGISTRY_TARGET: &str = "logger::registry";

/// Exact tracing targets of the crate's own diagnostics.
///
/// Matching is by equality, so ordinary events whose module path merely
/// starts with `logger::` are not affected.
pub const INTERNAL_TARGETS: [&str; 2] = [CONFIG_TARGET, REGISTRY_TARGET];

/// Returns `true` when `target` is one of [`INTERNAL_TARGETS`].
#[must_use]
pub fn is_internal_target(target: &str) -> bool {
    INTERNAL_TARGETS.contains(&target)
}

/// Where a resolved threshold came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ThresholdOrigin {
    Configured,
    Default,
    Explicit,
}

#[cfg(feature = "tracing")]
impl ThresholdOrigin {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::Default => "default",
            Self::Explicit => "explicit",
        }
    }
}

/// Trace the threshold a logger was built with.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn threshold_resolved(threshold: Severity, origin: ThresholdOrigin) {
    debug!(
        target: CONFIG_TARGET,
        threshold = threshold.label(),
        origin = origin.as_str(),
        "logger threshold {} ({})",
        threshold,
        origin.as_str()
    );
}

/// Trace the threshold a logger was built with - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn threshold_resolved(_threshold: Severity, _origin: ThresholdOrigin) {}

/// Trace a handler registration. `level` is `None` for global subscribers.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn handler_added(level: Option<Severity>, id: HandlerId) {
    trace!(
        target: REGISTRY_TARGET,
        operation = "add",
        scope = level.map_or("global", Severity::label),
        id = id.get(),
        "registered handler {}",
        id
    );
}

/// Trace a handler registration - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn handler_added(_level: Option<Severity>, _id: HandlerId) {}

/// Trace a removal attempt and whether it matched a registration.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn handler_removed(level: Option<Severity>, id: HandlerId, removed: bool) {
    trace!(
        target: REGISTRY_TARGET,
        operation = "remove",
        scope = level.map_or("global", Severity::label),
        id = id.get(),
        removed = removed,
        "removed handler {} (matched: {})",
        id,
        removed
    );
}

/// Trace a removal attempt - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn handler_removed(_level: Option<Severity>, _id: HandlerId, _removed: bool) {}
