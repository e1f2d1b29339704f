//! Server records and mutation replies.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// One record of a managed type: the server-assigned id plus its fields.
///
/// On the wire the id travels as `_id` next to the flattened fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Entity", deserialize = "T: Entity"))]
pub struct Resource<T: Entity> {
    #[serde(rename = "_id")]
    pub id: T::Id,
    #[serde(flatten)]
    pub fields: T,
}

impl<T: Entity> Resource<T> {
    pub fn new(id: impl Into<T::Id>, fields: T) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// What the server sent back for a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T: Entity> {
    /// The created or updated record, the new source of truth.
    Record(Resource<T>),
    /// Only an acknowledgement message; the record must be re-fetched.
    Message(String),
}

impl<T: Entity> Reply<T> {
    pub fn record(&self) -> Option<&Resource<T>> {
        match self {
            Reply::Record(resource) => Some(resource),
            Reply::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Reply::Record(_) => None,
            Reply::Message(message) => Some(message),
        }
    }
}

/// Acknowledgement of a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}
