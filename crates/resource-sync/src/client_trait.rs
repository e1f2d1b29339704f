//! # ScreenClient Trait
//!
//! Common interface for entity-specific screen clients. Implementors expose their inner
//! [`ListClient`] and an error mapping; the list operations come for free.
use crate::{Confirm, Entity, ListClient, LoadOutcome, Resource, SyncError};
use crate::resource::Ack;
use async_trait::async_trait;

/// Trait for entity-specific clients to inherit the standard list operations.
///
/// # Example
///
/// ```ignore
/// struct CategoryClient {
///     inner: ListClient<Category>,
/// }
///
/// #[async_trait]
/// impl ScreenClient<Category> for CategoryClient {
///     type Error = ConsoleError;
///
///     fn inner(&self) -> &ListClient<Category> {
///         &self.inner
///     }
///
///     fn map_error(e: SyncError) -> Self::Error {
///         ConsoleError::Sync(e)
///     }
/// }
///
/// // load(), begin(), save(), remove() ... are provided automatically.
/// let _ = categories.load().await;
/// ```
#[async_trait]
pub trait ScreenClient<T: Entity>: Send + Sync {
    /// The screen-specific error type.
    type Error: From<SyncError> + Send + Sync;

    /// Access the inner generic ListClient.
    fn inner(&self) -> &ListClient<T>;

    /// Map controller errors to the screen's error type.
    fn map_error(e: SyncError) -> Self::Error;

    #[tracing::instrument(skip(self), fields(entity_type = T::LABEL))]
    async fn load(&self) -> Result<LoadOutcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().load().await.map_err(Self::map_error)
    }

    async fn list(&self) -> Result<Vec<Resource<T>>, Self::Error> {
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::LABEL))]
    async fn begin(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().begin(id).await.map_err(Self::map_error)
    }

    async fn edit(&self, field: &str, value: &str) -> Result<(), Self::Error> {
        self.inner().edit(field, value).await.map_err(Self::map_error)
    }

    async fn cancel(&self) -> Result<(), Self::Error> {
        self.inner().cancel().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::LABEL))]
    async fn save(&self) -> Result<Resource<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().save().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, form), fields(entity_type = T::LABEL))]
    async fn submit(&self, form: &mut T) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .submit(form)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, confirm), fields(entity_type = T::LABEL))]
    async fn remove(&self, id: T::Id, confirm: &dyn Confirm) -> Result<Ack, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(id, confirm).await.map_err(Self::map_error)
    }
}
