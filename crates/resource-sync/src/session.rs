//! # Edit Session
//!
//! Tracks the single in-place edit a list controller allows at a time.
//!
//! ```text
//!            begin(id)               begin(id')
//!   Idle ───────────────▶ Editing(id) ─────────▶ Editing(id')
//!    ▲                        │
//!    └── cancel / confirmed ──┘
//!        update of id
//! ```
//!
//! The active id and the working copy are stored together, so one can never be set
//! without the other. `begin` on a different id replaces the uncommitted copy without
//! asking; the discarded copy is handed back to the caller.

use crate::entity::Entity;
use crate::error::SyncError;

/// Observable state of an [`EditSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState<Id> {
    Idle,
    Editing(Id),
}

/// At most one uncommitted working copy, keyed by entity id.
#[derive(Debug, Clone)]
pub struct EditSession<T: Entity> {
    active: Option<(T::Id, T)>,
}

impl<T: Entity> Default for EditSession<T> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<T: Entity> EditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `id` with a copy of `current`.
    ///
    /// Returns the session that was replaced, if one was active.
    pub fn begin(&mut self, id: T::Id, current: &T) -> Option<(T::Id, T)> {
        self.active.replace((id, current.clone()))
    }

    /// Set one field of the working copy from text input.
    pub fn update(&mut self, field: &str, value: &str) -> Result<(), SyncError> {
        let (_, working) = self.active.as_mut().ok_or(SyncError::NoActiveEdit)?;
        working.set_field(field, value)?;
        Ok(())
    }

    /// The id and working copy to hand to the mutator. The session stays active.
    pub fn commit(&self) -> Result<(T::Id, T), SyncError> {
        self.active.clone().ok_or(SyncError::NoActiveEdit)
    }

    /// Drop the session without side effects elsewhere.
    pub fn cancel(&mut self) -> Option<(T::Id, T)> {
        self.active.take()
    }

    /// Clear the session only if it targets `id`.
    pub fn finish(&mut self, id: &T::Id) -> bool {
        if self.is_editing(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn is_editing(&self, id: &T::Id) -> bool {
        matches!(&self.active, Some((active, _)) if active == id)
    }

    pub fn active_id(&self) -> Option<&T::Id> {
        self.active.as_ref().map(|(id, _)| id)
    }

    pub fn working_copy(&self) -> Option<&T> {
        self.active.as_ref().map(|(_, fields)| fields)
    }

    pub fn state(&self) -> EditState<T::Id> {
        match &self.active {
            Some((id, _)) => EditState::Editing(id.clone()),
            None => EditState::Idle,
        }
    }

    pub fn snapshot(&self) -> Option<(T::Id, T)> {
        self.active.clone()
    }
}
