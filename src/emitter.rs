use std::{
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    Config, Error, EventKey, Handler, Result, SubscribeOptions, Topic, Unsubscribe,
    internal::{Entry, OnceHandler, Store, SubscriptionId, next_subscription_id},
};

/// Synchronous, in-process event emitter.
///
/// Handlers are registered per key, or on [`Topic::Wildcard`] to receive
/// everything. [`publish`](Self::publish) runs the matching handlers right
/// away, on the caller's thread: exact-key handlers first, in registration
/// order, then wildcard handlers, in theirs.
///
/// Each pass iterates a snapshot taken when the pass starts. Handlers may
/// subscribe, unsubscribe or publish while running; such changes only show
/// up in snapshots taken afterwards. Because the wildcard snapshot is taken
/// after the exact-key pass completes, an exact-key handler that removes a
/// wildcard handler prevents it from running in the same publish.
///
/// `Emitter` is a cheap handle: clones share one store, while every
/// [`Emitter::new`] starts from an empty one. Handlers that need to reach
/// their own emitter should capture a [`WeakEmitter`] to avoid a reference
/// cycle.
///
/// # Examples
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
/// use emitron::{Emitter, Topic};
///
/// let emitter = Emitter::<&str, String>::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let s = seen.clone();
/// emitter.on(Topic::Wildcard, move |payload, key| {
///     s.borrow_mut().push(format!("{key}:{payload}"));
///     Ok(())
/// });
///
/// emitter.publish("greet", "hello".to_string())?;
/// assert_eq!(*seen.borrow(), vec!["greet:hello"]);
/// # Ok::<(), emitron::Error>(())
/// ```
pub struct Emitter<K, P> {
    store: Rc<Store<K, P>>,
}

impl<K: EventKey, P: 'static> Emitter<K, P> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            store: Rc::new(Store::new(config)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.store.config
    }

    /// Returns a handle that doesn't keep the emitter alive.
    pub fn downgrade(&self) -> WeakEmitter<K, P> {
        WeakEmitter {
            store: Rc::downgrade(&self.store),
        }
    }

    /// Registers a closure with default options.
    pub fn on<F>(&self, topic: impl Into<Topic<K>>, handler: F) -> Unsubscribe<K, P>
    where
        F: Fn(&P, &K) -> Result<()> + 'static,
    {
        self.subscribe(topic, &Handler::new(handler), SubscribeOptions::default())
    }

    pub fn on_with<F>(
        &self,
        topic: impl Into<Topic<K>>,
        handler: F,
        options: SubscribeOptions,
    ) -> Unsubscribe<K, P>
    where
        F: Fn(&P, &K) -> Result<()> + 'static,
    {
        self.subscribe(topic, &Handler::new(handler), options)
    }

    /// Registers a closure that runs for the first matching event only.
    pub fn once<F>(&self, topic: impl Into<Topic<K>>, handler: F) -> Unsubscribe<K, P>
    where
        F: Fn(&P, &K) -> Result<()> + 'static,
    {
        self.subscribe(
            topic,
            &Handler::new(handler),
            SubscribeOptions::default().once(),
        )
    }

    /// Appends `handler` to the topic's list.
    ///
    /// The same handler may be subscribed several times and then runs that
    /// many times per publish. If the options carry a cancellation signal
    /// that is already cancelled, nothing is registered and the returned
    /// token is a no-op.
    pub fn subscribe(
        &self,
        topic: impl Into<Topic<K>>,
        handler: &Handler<K, P>,
        options: SubscribeOptions,
    ) -> Unsubscribe<K, P> {
        let topic = topic.into();
        if options.is_cancelled() {
            tracing::debug!(
                emitter = self.store.label(),
                %topic,
                "signal already cancelled, subscription skipped"
            );
            return Unsubscribe::noop();
        }

        let id = next_subscription_id();
        let dispatch = if options.is_once() {
            OnceHandler::new(
                handler.clone(),
                Rc::downgrade(&self.store),
                vec![(topic.clone(), id)],
            )
            .into_handler()
        } else {
            handler.clone()
        };
        self.register(topic.clone(), id, handler, dispatch, &options);

        tracing::debug!(
            emitter = self.store.label(),
            %topic,
            once = options.is_once(),
            "subscribed"
        );
        Unsubscribe::new(Rc::downgrade(&self.store), vec![(topic, id)])
    }

    /// Subscribes one handler to every key in `keys`, as a group.
    ///
    /// Without `once`, this is the same as subscribing to each key in turn.
    /// With `once`, all keys share one wrapper: the first event on any of
    /// them removes the handler from the whole group, then runs it.
    /// A cancellation signal is propagated to every key.
    ///
    /// The returned token removes the handler from all keys of the group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKeyGroup`] if `keys` is empty.
    pub fn subscribe_many(
        &self,
        keys: &[K],
        handler: &Handler<K, P>,
        options: SubscribeOptions,
    ) -> Result<Unsubscribe<K, P>> {
        if keys.is_empty() {
            return Err(Error::EmptyKeyGroup);
        }
        if options.is_cancelled() {
            tracing::debug!(
                emitter = self.store.label(),
                keys = keys.len(),
                "signal already cancelled, batch subscription skipped"
            );
            return Ok(Unsubscribe::noop());
        }

        let registrations: Vec<(Topic<K>, SubscriptionId)> = keys
            .iter()
            .map(|key| (Topic::Key(key.clone()), next_subscription_id()))
            .collect();

        let dispatch = if options.is_once() {
            OnceHandler::new(
                handler.clone(),
                Rc::downgrade(&self.store),
                registrations.clone(),
            )
            .into_handler()
        } else {
            handler.clone()
        };
        for (topic, id) in &registrations {
            self.register(topic.clone(), *id, handler, dispatch.clone(), &options);
        }

        tracing::debug!(
            emitter = self.store.label(),
            keys = ?keys,
            once = options.is_once(),
            "subscribed to key group"
        );
        Ok(Unsubscribe::new(Rc::downgrade(&self.store), registrations))
    }

    /// Same as [`subscribe_many`](Self::subscribe_many) for a closure.
    pub fn on_many<F>(
        &self,
        keys: &[K],
        handler: F,
        options: SubscribeOptions,
    ) -> Result<Unsubscribe<K, P>>
    where
        F: Fn(&P, &K) -> Result<()> + 'static,
    {
        self.subscribe_many(keys, &Handler::new(handler), options)
    }

    /// Removes handlers from a topic.
    ///
    /// With a handler, removes the first entry subscribed with it. Without
    /// one, empties the topic's list, leaving other keys and the wildcard
    /// untouched. Unknown topics and handlers are ignored.
    pub fn unsubscribe(&self, topic: impl Into<Topic<K>>, handler: Option<&Handler<K, P>>) {
        let topic = topic.into();
        match handler {
            Some(handler) => {
                if self.store.remove_handler(&topic, handler) {
                    tracing::debug!(emitter = self.store.label(), %topic, "unsubscribed");
                }
            }
            None => {
                if let Some(removed) = self.store.clear_topic(&topic) {
                    tracing::debug!(
                        emitter = self.store.label(),
                        %topic,
                        removed,
                        "unsubscribed all"
                    );
                }
            }
        }
    }

    /// Removes every handler from every topic.
    pub fn clear(&self) {
        self.store.clear();
        tracing::debug!(emitter = self.store.label(), "cleared");
    }

    /// Delivers `payload` to the handlers of `key`, then to wildcard handlers.
    ///
    /// # Errors
    ///
    /// The first handler error is returned as is and stops the fan-out:
    /// remaining handlers of the current pass don't run, and neither does
    /// the wildcard pass if the error came from the exact-key pass.
    pub fn publish(&self, key: K, payload: P) -> Result<()> {
        let exact = self.store.snapshot(&Topic::Key(key.clone()));
        tracing::trace!(
            emitter = self.store.label(),
            key = ?key,
            handlers = exact.len(),
            "publish"
        );
        self.dispatch(exact, &payload, &key)?;

        let wildcard = self.store.snapshot(&Topic::Wildcard);
        tracing::trace!(
            emitter = self.store.label(),
            key = ?key,
            handlers = wildcard.len(),
            "publish to wildcard"
        );
        self.dispatch(wildcard, &payload, &key)
    }

    /// Number of handlers currently registered on `topic`.
    pub fn handler_count(&self, topic: &Topic<K>) -> usize {
        self.store.len(topic)
    }

    pub fn has_handlers(&self, topic: &Topic<K>) -> bool {
        self.handler_count(topic) > 0
    }

    fn dispatch(&self, snapshot: Vec<Handler<K, P>>, payload: &P, key: &K) -> Result<()> {
        for handler in snapshot {
            handler.call(payload, key).inspect_err(|err| {
                tracing::debug!(
                    emitter = self.store.label(),
                    key = ?key,
                    error = %err,
                    "handler failed, publish aborted"
                );
            })?;
        }
        Ok(())
    }

    fn register(
        &self,
        topic: Topic<K>,
        id: SubscriptionId,
        origin: &Handler<K, P>,
        dispatch: Handler<K, P>,
        options: &SubscribeOptions,
    ) {
        let entry = Entry::new(id, origin.clone(), dispatch);
        let Some(signal) = options.signal() else {
            self.store.insert(topic, entry);
            return;
        };

        let store = Rc::downgrade(&self.store);
        let target = topic.clone();
        let registration = signal.on_cancel(Box::new(move || {
            let Some(store) = store.upgrade() else {
                return;
            };
            if store.remove(&target, id) {
                tracing::debug!(
                    emitter = store.label(),
                    topic = %target,
                    "unsubscribed by cancellation"
                );
            }
        }));
        self.store
            .insert(topic, entry.with_cancel(Rc::clone(signal), registration));
    }
}

impl<K: EventKey, P: 'static> Default for Emitter<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Clone for Emitter<K, P> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<K: EventKey, P> fmt::Debug for Emitter<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("label", &self.store.label())
            .finish()
    }
}

/// Non-owning handle to an [`Emitter`].
pub struct WeakEmitter<K, P> {
    store: Weak<Store<K, P>>,
}

impl<K, P> WeakEmitter<K, P> {
    /// Returns `None` once every [`Emitter`] handle has been dropped.
    pub fn upgrade(&self) -> Option<Emitter<K, P>> {
        self.store.upgrade().map(|store| Emitter { store })
    }
}

impl<K, P> Clone for WeakEmitter<K, P> {
    fn clone(&self) -> Self {
        Self {
            store: Weak::clone(&self.store),
        }
    }
}
