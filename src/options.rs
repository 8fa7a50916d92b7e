use std::{fmt, rc::Rc};

use crate::CancelSignal;

/// Per-subscription settings.
///
/// # Examples
///
/// ```rust
/// use emitron::{CancelSource, SubscribeOptions};
///
/// let source = CancelSource::new();
/// let opts = SubscribeOptions::default()
///     .once()                        // fire at most one time
///     .with_cancel(source.token());  // auto-remove on cancellation
/// assert!(opts.is_once());
/// ```
#[derive(Clone, Default)]
pub struct SubscribeOptions {
    once: bool,
    cancel: Option<Rc<dyn CancelSignal>>,
}

impl SubscribeOptions {
    /// Handler is removed before its first invocation runs.
    pub fn once(self) -> Self {
        self.with_once(true)
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Ties the subscription to a cancellation signal.
    ///
    /// A signal that is already cancelled makes the subscribe call a no-op.
    /// A live one removes the subscription when it fires. Invocations that
    /// already happened are unaffected.
    pub fn with_cancel(mut self, signal: impl CancelSignal + 'static) -> Self {
        self.cancel = Some(Rc::new(signal));
        self
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    pub(crate) fn signal(&self) -> Option<&Rc<dyn CancelSignal>> {
        self.cancel.as_ref()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|s| s.is_cancelled())
    }
}

impl fmt::Debug for SubscribeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscribeOptions")
            .field("once", &self.once)
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}
