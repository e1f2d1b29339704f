//! # Controller Messages
//!
//! This module defines the request type a [`ListClient`](crate::ListClient) sends to its
//! [`ListActor`](crate::ListActor).
//!
//! # The CRUD Pattern
//! The variants map onto the operations of a list screen:
//!
//! - **Fetcher**: `Load`, `Snapshot`.
//! - **Edit Session**: `Begin`, `Edit`, `Session`, `Cancel`.
//! - **Mutator**: `Save`, `Update`, `Create`, `Remove`.
//!
//! Every variant is generic over `T: Entity`, so a product form can never be sent to the
//! category controller.

use crate::entity::Entity;
use crate::error::SyncError;
use crate::resource::{Ack, Reply, Resource};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by controllers.
pub type Response<T> = oneshot::Sender<Result<T, SyncError>>;

/// Result of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was replaced with `count` records.
    Applied { count: usize },
    /// Newer state was applied while the fetch was in flight; the result was discarded.
    Superseded,
}

#[derive(Debug)]
pub enum ListRequest<T: Entity> {
    Load {
        respond_to: Response<LoadOutcome>,
    },
    Snapshot {
        respond_to: Response<Vec<Resource<T>>>,
    },
    Begin {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Edit {
        field: String,
        value: String,
        respond_to: Response<()>,
    },
    Session {
        respond_to: Response<Option<(T::Id, T)>>,
    },
    Cancel {
        respond_to: Response<()>,
    },
    Save {
        respond_to: Response<Resource<T>>,
    },
    Update {
        id: T::Id,
        fields: T,
        respond_to: Response<Resource<T>>,
    },
    Create {
        fields: T,
        respond_to: Response<Reply<T>>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<Ack>,
    },
}
