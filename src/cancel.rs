//! Cooperative cancellation of subscriptions.
//!
//! The emitter never polls a signal. At subscribe time it checks
//! [`CancelSignal::is_cancelled`] once and, if the signal is still live,
//! registers a removal callback through [`CancelSignal::on_cancel`]. The
//! signal owner decides when that callback runs. Until then the emitter also
//! skips entries whose signal reports cancellation, so delivery stops as soon
//! as the signal flips even if the callback is deferred.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Source of cancellation observed by subscriptions.
///
/// Implemented by [`CancelToken`] and, with the `tokio` feature, by
/// `tokio_util::sync::CancellationToken`.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;

    /// Registers `callback` to run once when the signal is cancelled.
    ///
    /// Implementations must run the callback on the thread that owns the
    /// emitter, and should run it right away if already cancelled. Dropping
    /// the returned registration must withdraw a callback that hasn't run.
    fn on_cancel(&self, callback: Box<dyn FnOnce()>) -> CancelRegistration;
}

/// Pending [`CancelSignal::on_cancel`] callback.
///
/// Dropping it deregisters the callback. The emitter keeps one per entry,
/// so a subscription that ends early no longer occupies the signal.
#[must_use = "dropping the registration withdraws the callback"]
pub struct CancelRegistration {
    deregister: Option<Box<dyn FnOnce()>>,
}

impl CancelRegistration {
    /// Registration that runs `deregister` when dropped.
    pub fn new(deregister: impl FnOnce() + 'static) -> Self {
        Self {
            deregister: Some(Box::new(deregister)),
        }
    }

    /// Registration with nothing to withdraw, e.g. after the callback ran.
    pub fn detached() -> Self {
        Self { deregister: None }
    }
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        if let Some(deregister) = self.deregister.take() {
            deregister();
        }
    }
}

impl fmt::Debug for CancelRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelRegistration")
            .field("pending", &self.deregister.is_some())
            .finish()
    }
}

type CancelCallback = (u64, Box<dyn FnOnce()>);

#[derive(Default)]
struct CancelState {
    cancelled: Cell<bool>,
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<CancelCallback>>,
}

/// Owning side of a cancellation signal.
///
/// # Examples
///
/// ```rust
/// use emitron::{CancelSource, Emitter, SubscribeOptions};
///
/// let emitter = Emitter::<&str, u32>::new();
/// let source = CancelSource::new();
/// emitter.on_with("tick", |_, _| Ok(()), SubscribeOptions::default().with_cancel(source.token()));
/// assert!(emitter.has_handlers(&"tick".into()));
///
/// source.cancel();
/// assert!(!emitter.has_handlers(&"tick".into()));
/// ```
#[derive(Default)]
pub struct CancelSource {
    state: Rc<CancelState>,
}

impl CancelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token observing this source.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            state: Rc::clone(&self.state),
        }
    }

    /// Cancels the source, running every registered callback in registration
    /// order. Subsequent calls do nothing.
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        let callbacks = std::mem::take(&mut *self.state.callbacks.borrow_mut());
        tracing::trace!(callbacks = callbacks.len(), "cancel source triggered");
        for (_, callback) in callbacks {
            callback();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Number of callbacks waiting for [`cancel`](Self::cancel).
    pub fn pending_callbacks(&self) -> usize {
        self.state.callbacks.borrow().len()
    }
}

impl fmt::Debug for CancelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Observing side of a [`CancelSource`]. Cheap to clone.
#[derive(Clone)]
pub struct CancelToken {
    state: Rc<CancelState>,
}

impl CancelSignal for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    fn on_cancel(&self, callback: Box<dyn FnOnce()>) -> CancelRegistration {
        if self.is_cancelled() {
            callback();
            return CancelRegistration::detached();
        }
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.callbacks.borrow_mut().push((id, callback));

        let state = Rc::downgrade(&self.state);
        CancelRegistration::new(move || {
            if let Some(state) = state.upgrade() {
                state.callbacks.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Requires a [`tokio::task::LocalSet`]: the callback is driven by a local
/// task, so entries are only pruned once that task gets polled after the
/// token is cancelled. Delivery stops right away regardless, since the
/// emitter checks the token when taking a snapshot. Dropping the
/// registration aborts the task.
///
/// # Panics
///
/// Panics if called outside of a `LocalSet` context.
#[cfg(feature = "tokio")]
impl CancelSignal for tokio_util::sync::CancellationToken {
    fn is_cancelled(&self) -> bool {
        tokio_util::sync::CancellationToken::is_cancelled(self)
    }

    fn on_cancel(&self, callback: Box<dyn FnOnce()>) -> CancelRegistration {
        let token = self.clone();
        let task = tokio::task::spawn_local(async move {
            token.cancelled().await;
            callback();
        });
        CancelRegistration::new(move || task.abort())
    }
}
