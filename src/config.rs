use std::borrow::Cow;

/// Emitter configuration.
///
/// Use the builder methods to customize, or [`Default`] for sensible
/// defaults.
///
/// # Examples
///
/// ```rust
/// use emitron::{Config, Emitter};
///
/// let config = Config::default()
///     .with_label("ui-events")      // shows up in log events
///     .with_initial_capacity(64);   // expected number of distinct keys
/// let emitter = Emitter::<&str, ()>::with_config(config);
/// assert_eq!(emitter.config().label, "ui-events");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Name attached to every log event emitted by this emitter.
    /// Default: "emitron"
    pub label: Cow<'static, str>,

    /// Number of distinct keys the store is pre-sized for.
    /// Default: 16
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            label: Cow::Borrowed("emitron"),
            initial_capacity: 16,
        }
    }
}

impl Config {
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
