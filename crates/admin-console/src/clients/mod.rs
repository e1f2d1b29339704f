//! # Screen Clients
//!
//! Type-safe handles for the three list screens. Each wraps a
//! [`ListClient`](resource_sync::ListClient) and gets the standard list operations from
//! [`ScreenClient`](resource_sync::ScreenClient); the wrappers only add what a screen needs
//! on top (search, autocomplete).

pub mod category_client;
pub mod offer_client;
pub mod product_client;

pub use category_client::CategoryClient;
pub use offer_client::OfferClient;
pub use product_client::ProductClient;

use crate::error::ConsoleError;
use resource_sync::{Entity, ListActor, ListClient, Notifier, RemoteStore};
use std::sync::Arc;

/// Creates a list controller for `T` and wraps its client.
///
/// The actor is returned unstarted; spawn `actor.run(mount)`.
pub fn new<T: Entity, C>(
    buffer_size: usize,
    store: Arc<dyn RemoteStore<T>>,
    notifier: Notifier,
    wrap: impl FnOnce(ListClient<T>) -> C,
) -> (ListActor<T>, C) {
    let (actor, client) = ListActor::new(buffer_size, store, notifier);
    (actor, wrap(client))
}

pub(crate) fn map_error(e: resource_sync::SyncError) -> ConsoleError {
    ConsoleError::Sync(e)
}
