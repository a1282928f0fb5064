//! crates/logger/src/registry.rs
//! Ordered listener lists keyed by registration token.

use std::fmt;
use std::sync::Arc;

/// Opaque token identifying one handler registration.
///
/// Tokens are unique within the [`Logger`](crate::Logger) that issued them and
/// are never reused, so removing with a stale token is always a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handlers in registration order.
///
/// The same handler may appear several times under different tokens; each
/// entry is invoked separately.
pub(crate) struct ListenerList<F: ?Sized> {
    entries: Vec<(HandlerId, Arc<F>)>,
}

impl<F: ?Sized> ListenerList<F> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: HandlerId, handler: Arc<F>) {
        self.entries.push((id, handler));
    }

    /// Removes the entry registered under `id`, returning whether one existed.
    pub(crate) fn remove(&mut self, id: HandlerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clones the handlers so they can be invoked without holding a lock.
    pub(crate) fn snapshot(&self) -> Vec<Arc<F>> {
        self.entries
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<F: ?Sized> Default for ListenerList<F> {
    fn default() -> Self {
        Self::new()
    }
}
