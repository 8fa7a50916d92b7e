use std::{fmt, rc::Rc};

use crate::Result;

type Callback<K, P> = dyn Fn(&P, &K) -> Result<()>;

/// Shared callback invoked with `(payload, key)` for every matching event.
///
/// A `Handler` is a cheap-to-clone reference to one callback. Clones share
/// identity: [`Emitter::unsubscribe`](crate::Emitter::unsubscribe) removes
/// entries registered with the *same* handler, not with an equal-looking
/// closure. Keep the handler around if you intend to remove it by reference,
/// or use the [`Unsubscribe`](crate::Unsubscribe) token returned on subscribe.
///
/// Handlers run synchronously on the publishing thread. Use `Cell`/`RefCell`
/// captures for state; a handler may re-enter the emitter.
///
/// # Examples
///
/// ```rust
/// use emitron::{Emitter, Handler, SubscribeOptions};
///
/// let emitter = Emitter::<&str, u32>::new();
/// let handler = Handler::new(|n: &u32, key: &&str| {
///     println!("{key} -> {n}");
///     Ok(())
/// });
/// emitter.subscribe("tick", &handler, SubscribeOptions::default());
/// emitter.unsubscribe("tick", Some(&handler));
/// assert!(!emitter.has_handlers(&"tick".into()));
/// ```
pub struct Handler<K, P> {
    callback: Rc<Callback<K, P>>,
}

impl<K, P> Handler<K, P> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&P, &K) -> Result<()> + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    #[inline]
    pub(crate) fn call(&self, payload: &P, key: &K) -> Result<()> {
        (self.callback)(payload, key)
    }

    /// Returns `true` if both handlers share the same callback.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<K, P> Clone for Handler<K, P> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<K, P> PartialEq for Handler<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<K, P> Eq for Handler<K, P> {}

impl<K, P> fmt::Debug for Handler<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_clones_share_identity() {
        let h1 = Handler::new(|_: &u8, _: &&str| Ok(()));
        let h2 = h1.clone();
        let h3 = Handler::new(|_: &u8, _: &&str| Ok(()));
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_call_passes_payload_and_key() {
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let handler = Handler::new(move |n: &u32, key: &&str| {
            assert_eq!(*key, "add");
            s.set(s.get() + n);
            Ok(())
        });
        handler.call(&2, &"add").unwrap();
        handler.call(&3, &"add").unwrap();
        assert_eq!(seen.get(), 5);
    }
}
