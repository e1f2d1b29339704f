//! # List Client
//!
//! The handle a screen uses to talk to its [`ListActor`](crate::ListActor).

use crate::confirm::Confirm;
use crate::entity::Entity;
use crate::error::SyncError;
use crate::message::{ListRequest, LoadOutcome, Response};
use crate::resource::{Ack, Reply, Resource};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ListActor`.
///
/// The client holds only a sender, so cloning is cheap and every clone talks to the same
/// controller. All methods resolve to `Result<_, SyncError>`; a controller that has shut down
/// surfaces as [`SyncError::ControllerClosed`].
pub struct ListClient<T: Entity> {
    sender: mpsc::Sender<ListRequest<T>>,
}

impl<T: Entity> Clone for ListClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ListClient<T> {
    pub fn new(sender: mpsc::Sender<ListRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ListRequest<T>,
    ) -> Result<R, SyncError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SyncError::ControllerClosed)?;
        response.await.map_err(|_| SyncError::ControllerDropped)?
    }

    /// Re-fetch the whole collection.
    pub async fn load(&self) -> Result<LoadOutcome, SyncError> {
        self.request(|respond_to| ListRequest::Load { respond_to })
            .await
    }

    /// Copy of the collection as currently held, in server order.
    pub async fn snapshot(&self) -> Result<Vec<Resource<T>>, SyncError> {
        self.request(|respond_to| ListRequest::Snapshot { respond_to })
            .await
    }

    /// Start editing the entry with `id`. Returns the working copy of any session it replaced.
    pub async fn begin(&self, id: T::Id) -> Result<Option<T>, SyncError> {
        self.request(|respond_to| ListRequest::Begin { id, respond_to })
            .await
    }

    /// Set one field of the working copy from form text.
    pub async fn edit(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SyncError> {
        let (field, value) = (field.into(), value.into());
        self.request(|respond_to| ListRequest::Edit {
            field,
            value,
            respond_to,
        })
        .await
    }

    /// The active edit, if any.
    pub async fn session(&self) -> Result<Option<(T::Id, T)>, SyncError> {
        self.request(|respond_to| ListRequest::Session { respond_to })
            .await
    }

    pub async fn cancel(&self) -> Result<(), SyncError> {
        self.request(|respond_to| ListRequest::Cancel { respond_to })
            .await
    }

    /// Send the working copy as an update of the entry under edit.
    pub async fn save(&self) -> Result<Resource<T>, SyncError> {
        self.request(|respond_to| ListRequest::Save { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, fields: T) -> Result<Resource<T>, SyncError> {
        self.request(|respond_to| ListRequest::Update {
            id,
            fields,
            respond_to,
        })
        .await
    }

    /// Create a new entry. It becomes visible in [`snapshot`](Self::snapshot) after the
    /// re-fetch that follows a successful create.
    pub async fn create(&self, fields: T) -> Result<Reply<T>, SyncError> {
        self.request(|respond_to| ListRequest::Create { fields, respond_to })
            .await
    }

    /// Create from an input form. The form is reset to its empty default only on success.
    pub async fn submit(&self, form: &mut T) -> Result<Reply<T>, SyncError> {
        let reply = self.create(form.clone()).await?;
        *form = T::default();
        Ok(reply)
    }

    /// Delete the entry with `id` after asking `confirm`.
    ///
    /// A declined confirmation returns [`SyncError::Declined`] without sending anything.
    pub async fn remove(&self, id: T::Id, confirm: &dyn Confirm) -> Result<Ack, SyncError> {
        let prompt = format!("Are you sure you want to delete this {}?", T::LABEL);
        if !confirm.confirm(&prompt) {
            tracing::debug!(entity_type = T::LABEL, %id, "Delete declined");
            return Err(SyncError::Declined);
        }
        self.request(|respond_to| ListRequest::Remove { id, respond_to })
            .await
    }
}
