//! # Remote Store
//!
//! The seam between a list controller and the remote API.
//!
//! Controllers only ever talk to `Arc<dyn RemoteStore<T>>`, so the same controller code runs
//! against the HTTP backend in production and against [`MockStore`](crate::mock::MockStore)
//! in tests. The traits are `#[async_trait]` so they stay object safe.

use crate::entity::Entity;
use crate::error::RemoteError;
use crate::resource::{Ack, Reply, Resource};
use async_trait::async_trait;

/// Read access to a remote collection of `R`.
#[async_trait]
pub trait RemoteSource<R>: Send + Sync {
    /// Fetch the whole collection, in server order.
    async fn list(&self) -> Result<Vec<R>, RemoteError>;
}

/// Full CRUD access to a remote collection of [`Resource<T>`].
#[async_trait]
pub trait RemoteStore<T: Entity>: RemoteSource<Resource<T>> {
    async fn create(&self, fields: T) -> Result<Reply<T>, RemoteError>;

    async fn update(&self, id: T::Id, fields: T) -> Result<Reply<T>, RemoteError>;

    async fn remove(&self, id: T::Id) -> Result<Ack, RemoteError>;
}
