use std::{cell::RefCell, collections::HashMap};

use super::{Entry, SubscriptionId};
use crate::{Config, EventKey, Handler, Topic};

/// Topic to ordered handler list.
///
/// Insertion order is dispatch order. Borrows never outlive a single method
/// call, so handlers are free to call back into the store while running.
pub(crate) struct Store<K, P> {
    topics: RefCell<HashMap<Topic<K>, Vec<Entry<K, P>>>>,
    pub(crate) config: Config,
}

impl<K: EventKey, P> Store<K, P> {
    pub fn new(config: Config) -> Self {
        Self {
            topics: RefCell::new(HashMap::with_capacity(config.initial_capacity)),
            config,
        }
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn insert(&self, topic: Topic<K>, entry: Entry<K, P>) {
        self.topics.borrow_mut().entry(topic).or_default().push(entry);
    }

    /// Removes the entry created by one specific subscription.
    pub fn remove(&self, topic: &Topic<K>, id: SubscriptionId) -> bool {
        self.take_first(topic, |e| e.id == id).is_some()
    }

    /// Removes the first entry subscribed with `handler`.
    pub fn remove_handler(&self, topic: &Topic<K>, handler: &Handler<K, P>) -> bool {
        self.take_first(topic, |e| e.origin.ptr_eq(handler))
            .is_some()
    }

    /// Empties the topic's list, keeping the topic itself. Returns the number
    /// of removed entries, or `None` if the topic was never subscribed to.
    pub fn clear_topic(&self, topic: &Topic<K>) -> Option<usize> {
        let removed = std::mem::take(self.topics.borrow_mut().get_mut(topic)?);
        Some(removed.len())
    }

    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.topics.borrow_mut());
        drop(removed);
    }

    /// Copies the dispatch handlers of a topic, in registration order.
    ///
    /// Entries whose signal is already cancelled are pruned instead of
    /// copied, even if the signal hasn't run its callbacks yet.
    pub fn snapshot(&self, topic: &Topic<K>) -> Vec<Handler<K, P>> {
        let pruned: Vec<Entry<K, P>>;
        let snapshot = {
            let mut topics = self.topics.borrow_mut();
            let Some(entries) = topics.get_mut(topic) else {
                return Vec::new();
            };
            (pruned, *entries) = std::mem::take(entries)
                .into_iter()
                .partition(Entry::is_cancelled);
            entries
                .iter()
                .map(|e| e.dispatch.clone())
                .collect::<Vec<_>>()
        };
        if !pruned.is_empty() {
            tracing::debug!(
                emitter = self.label(),
                %topic,
                pruned = pruned.len(),
                "dropped cancelled subscriptions"
            );
        }
        snapshot
    }

    /// Detaches the first matching entry. The entry is dropped by the caller
    /// after the store borrow ends, since dropping it may call into its
    /// cancel signal.
    fn take_first(
        &self,
        topic: &Topic<K>,
        predicate: impl Fn(&Entry<K, P>) -> bool,
    ) -> Option<Entry<K, P>> {
        let mut topics = self.topics.borrow_mut();
        let entries = topics.get_mut(topic)?;
        let idx = entries.iter().position(predicate)?;
        Some(entries.remove(idx))
    }

    pub fn len(&self, topic: &Topic<K>) -> usize {
        self.topics.borrow().get(topic).map_or(0, Vec::len)
    }
}
