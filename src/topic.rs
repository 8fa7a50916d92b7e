use std::{fmt, hash::Hash};

/// Identifier under which handlers are grouped.
///
/// Keys are opaque to the emitter: anything hashable, comparable and
/// cloneable works, from `&'static str` to the key enums generated by
/// `#[derive(Event)]`. `Debug` is required so keys can appear in logs.
pub trait EventKey: Hash + Eq + Clone + fmt::Debug + 'static {}

impl<T> EventKey for T where T: Hash + Eq + Clone + fmt::Debug + 'static {}

/// Subscription target: either one exact key or every key.
///
/// Handlers registered on [`Topic::Wildcard`] receive every published event,
/// after the handlers of the exact key have run. Bare keys convert into
/// [`Topic::Key`], so `emitter.on("foo", ..)` and
/// `emitter.on(Topic::Key("foo"), ..)` are equivalent.
///
/// # Examples
///
/// ```rust
/// use emitron::Topic;
///
/// let exact: Topic<&str> = "foo".into();
/// assert_eq!(exact, Topic::Key("foo"));
/// assert!(Topic::<&str>::Wildcard.is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic<K> {
    /// Handlers fire only for events published under this key.
    Key(K),
    /// Handlers fire for every published event.
    Wildcard,
}

impl<K> Topic<K> {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Topic::Wildcard)
    }

    /// Returns the exact key, or `None` for the wildcard.
    pub fn key(&self) -> Option<&K> {
        match self {
            Topic::Key(key) => Some(key),
            Topic::Wildcard => None,
        }
    }
}

impl<K> From<K> for Topic<K> {
    fn from(key: K) -> Self {
        Topic::Key(key)
    }
}

impl<K: fmt::Debug> fmt::Display for Topic<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Key(key) => write!(f, "{key:?}"),
            Topic::Wildcard => write!(f, "*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversion() {
        let topic: Topic<&str> = "foo".into();
        assert_eq!(topic, Topic::Key("foo"));
        assert_eq!(topic.key(), Some(&"foo"));
        assert!(!topic.is_wildcard());
    }

    #[test]
    fn test_wildcard() {
        let topic = Topic::<u32>::Wildcard;
        assert!(topic.is_wildcard());
        assert_eq!(topic.key(), None);
        assert_eq!(topic.to_string(), "*");
    }

    #[test]
    fn test_wildcard_differs_from_every_key() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        enum Sensor {
            Temperature,
            Humidity,
        }
        assert_ne!(Topic::Key(Sensor::Temperature), Topic::Wildcard);
        assert_ne!(Topic::Key(Sensor::Humidity), Topic::Wildcard);
        assert_eq!(Topic::Key(Sensor::Humidity).to_string(), "Humidity");
    }
}
