mod entry;
mod once;
mod store;

pub(crate) use entry::{Entry, SubscriptionId, next_subscription_id};
pub(crate) use once::OnceHandler;
pub(crate) use store::Store;
