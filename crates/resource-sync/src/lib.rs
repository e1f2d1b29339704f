//! # Resource Sync
//!
//! Client-side CRUD synchronization for admin screens that manage remote collections.
//! The remote API owns every record; this crate keeps a local copy of one collection per
//! screen, lets the user edit one record at a time, and reconciles the local copy with
//! whatever the server answers.
//!
//! ## Architecture Overview
//!
//! Each screen gets one controller, split into three layers:
//!
//! 1. **Entity Layer** ([`Entity`]) - the editable field set of a record type
//! 2. **Runtime Layer** ([`ListActor`]) - owns the collection and edit session, talks to the store
//! 3. **Interface Layer** ([`ListClient`], [`ScreenClient`]) - type-safe communication
//!
//! The controller never blocks on the network. Remote calls run on their own tasks and
//! report back, so a fetch can still be in flight when a delete lands. Each fetch carries a
//! ticket from [`Generation`]; results older than the newest applied state are dropped.
//!
//! ```text
//!  screen ──ListClient──► ListActor ──spawn──► RemoteStore (HTTP / MockStore)
//!                            ▲                        │
//!                            └──── completion ────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! let notifier = Notifier::default();
//! let (actor, categories) = ListActor::<Category>::new(32, store, notifier.clone());
//! tokio::spawn(actor.run(Mount::Load));
//!
//! categories.begin(id.clone()).await?;
//! categories.edit("name", "Pet Toys").await?;
//! categories.save().await?;
//! ```
//!
//! ## Testing
//!
//! [`mock::MockStore`] scripts server replies so the real controller can be tested without
//! a network. See `tests/controller_test.rs` for every reconciliation rule in action.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod confirm;
pub mod entity;
pub mod error;
pub mod filter;
pub mod generation;
pub mod message;
pub mod mock;
pub mod notifier;
pub mod remote;
pub mod resource;
pub mod session;
pub mod tracing;

pub use actor::{ListActor, Mount};
pub use client::ListClient;
pub use client_trait::ScreenClient;
pub use confirm::Confirm;
pub use entity::Entity;
pub use error::{FieldError, RemoteError, SyncError};
pub use generation::{Generation, Ticket};
pub use message::{ListRequest, LoadOutcome};
pub use notifier::{Level, Notice, Notifier};
pub use remote::{RemoteSource, RemoteStore};
pub use resource::{Ack, Reply, Resource};
pub use session::{EditSession, EditState};
