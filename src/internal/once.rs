use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use super::{Store, SubscriptionId};
use crate::{EventKey, Handler, Result, Topic};

/// Fires the wrapped handler at most once across all of its registrations.
///
/// On the first call the wrapper removes every registration it knows about
/// and only then runs the inner handler, so a re-entrant publish from inside
/// the handler can no longer reach it. The `fired` flag covers the remaining
/// case: the same wrapper appearing more than once in a snapshot that is
/// already being walked.
pub(crate) struct OnceHandler<K, P> {
    inner: Handler<K, P>,
    fired: Cell<bool>,
    store: Weak<Store<K, P>>,
    registrations: Vec<(Topic<K>, SubscriptionId)>,
}

impl<K: EventKey, P: 'static> OnceHandler<K, P> {
    pub fn new(
        inner: Handler<K, P>,
        store: Weak<Store<K, P>>,
        registrations: Vec<(Topic<K>, SubscriptionId)>,
    ) -> Self {
        Self {
            inner,
            fired: Cell::new(false),
            store,
            registrations,
        }
    }

    /// Turns the wrapper into a handler that can be stored for dispatch.
    pub fn into_handler(self) -> Handler<K, P> {
        let once = Rc::new(self);
        Handler::new(move |payload: &P, key: &K| once.call(payload, key))
    }

    fn call(&self, payload: &P, key: &K) -> Result<()> {
        if self.fired.replace(true) {
            return Ok(());
        }
        if let Some(store) = self.store.upgrade() {
            for (topic, id) in &self.registrations {
                store.remove(topic, *id);
            }
            tracing::debug!(
                emitter = store.label(),
                topics = self.registrations.len(),
                "once handler fired, unsubscribed"
            );
        }
        self.inner.call(payload, key)
    }
}
