use std::sync::Arc;

/// Errors surfaced by the emitter.
///
/// The engine itself never fails a subscribe or unsubscribe. Errors come
/// either from misuse of
/// [`Emitter::subscribe_many`](crate::Emitter::subscribe_many) or
/// from handlers, which are free to return any of these variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Batch subscription requires at least one event key")]
    EmptyKeyGroup,

    #[error("Handler failed")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Error external to Emitron occured: {0}")]
    External(Arc<str>),
}

impl Error {
    /// Wraps any error raised inside a handler.
    pub fn handler<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Handler(Box::new(err))
    }

    pub fn external(msg: impl Into<Arc<str>>) -> Self {
        Error::External(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_keeps_source() {
        let io = std::io::Error::other("disk on fire");
        let err = Error::handler(io);
        assert_eq!(err.to_string(), "Handler failed");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk on fire"));
    }

    #[test]
    fn test_external_error_message() {
        let err = Error::external("boom");
        assert_eq!(err.to_string(), "Error external to Emitron occured: boom");
    }
}
