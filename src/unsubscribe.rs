use std::{cell::Cell, fmt, rc::Weak};

use crate::{
    EventKey, Topic,
    internal::{Store, SubscriptionId},
};

/// Capability returned by every subscribe call.
///
/// Calling [`unsubscribe`](Self::unsubscribe) removes exactly the entries
/// created by that call, from every key they were registered under. It is
/// idempotent, and safe to call after the emitter is gone or after the
/// subscription already went away through `once` or cancellation.
///
/// Dropping the token does *not* unsubscribe.
pub struct Unsubscribe<K, P> {
    store: Weak<Store<K, P>>,
    registrations: Vec<(Topic<K>, SubscriptionId)>,
    active: Cell<bool>,
}

impl<K: EventKey, P> Unsubscribe<K, P> {
    pub(crate) fn new(
        store: Weak<Store<K, P>>,
        registrations: Vec<(Topic<K>, SubscriptionId)>,
    ) -> Self {
        Self {
            store,
            registrations,
            active: Cell::new(true),
        }
    }

    /// Token for a subscription that was never registered.
    pub(crate) fn noop() -> Self {
        Self::new(Weak::new(), Vec::new())
    }

    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let removed = self
            .registrations
            .iter()
            .filter(|(topic, id)| store.remove(topic, *id))
            .count();
        tracing::debug!(emitter = store.label(), removed, "unsubscribed by token");
    }

    /// `false` once [`unsubscribe`](Self::unsubscribe) has been called.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl<K: fmt::Debug, P> fmt::Debug for Unsubscribe<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field(
                "topics",
                &self.registrations.iter().map(|(t, _)| t).collect::<Vec<_>>(),
            )
            .field("active", &self.active.get())
            .finish()
    }
}
