use std::rc::Rc;

use uuid::Uuid;

use crate::{CancelRegistration, CancelSignal, Handler};

pub(crate) type SubscriptionId = u128;

pub(crate) fn next_subscription_id() -> SubscriptionId {
    Uuid::new_v4().as_u128()
}

/// Stored form of a subscription.
///
/// `origin` is the handler the caller subscribed with and is what removal by
/// reference compares against. `dispatch` is what actually runs on publish:
/// either `origin` itself or a wrapper around it.
///
/// An entry tied to a signal holds its cancel registration, so removing the
/// entry by any path withdraws the callback from the signal.
pub(crate) struct Entry<K, P> {
    pub id: SubscriptionId,
    pub origin: Handler<K, P>,
    pub dispatch: Handler<K, P>,
    signal: Option<Rc<dyn CancelSignal>>,
    _registration: Option<CancelRegistration>,
}

impl<K, P> Entry<K, P> {
    pub fn new(id: SubscriptionId, origin: Handler<K, P>, dispatch: Handler<K, P>) -> Self {
        Self {
            id,
            origin,
            dispatch,
            signal: None,
            _registration: None,
        }
    }

    pub fn with_cancel(
        mut self,
        signal: Rc<dyn CancelSignal>,
        registration: CancelRegistration,
    ) -> Self {
        self.signal = Some(signal);
        self._registration = Some(registration);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.as_ref().is_some_and(|s| s.is_cancelled())
    }
}
