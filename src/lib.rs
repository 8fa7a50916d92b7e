//! Emitron - synchronous in-process event emitter
//!
//! Producers publish named events with a payload; consumers register
//! handlers per key, or on the wildcard to receive everything. Dispatch is
//! synchronous and single-threaded: [`Emitter::publish`] returns once every
//! matching handler has run.
//!
//! - Exact-key handlers run first, then wildcard handlers, each in
//!   registration order, each over a snapshot taken when its pass starts.
//! - Subscriptions can be `once`, tied to a [`CancelSignal`], or grouped
//!   over several keys with [`Emitter::subscribe_many`].
//! - Every subscribe call returns an [`Unsubscribe`] token.
//! - [`Event`] and `#[derive(Event)]` add a typed layer on top.
//!
//! See `demos/hello-world.rs` and `demos/cancellation.rs`.

extern crate self as emitron;

mod cancel;
mod config;
mod emitter;
mod error;
mod event;
mod handler;
mod options;
mod topic;
mod unsubscribe;

mod internal;

pub use cancel::{CancelRegistration, CancelSignal, CancelSource, CancelToken};
pub use config::Config;
pub use emitter::{Emitter, WeakEmitter};
pub use error::Error;
pub use event::{Event, EventBus};
pub use handler::Handler;
pub use options::SubscribeOptions;
pub use topic::{EventKey, Topic};
pub use unsubscribe::Unsubscribe;

#[cfg(feature = "macros")]
pub use emitron_macros::Event;

pub type Result<T = ()> = std::result::Result<T, Error>;
