//! # List Controller
//!
//! This module defines the `ListActor`, the component that owns one screen's collection and
//! edit session. It implements the "server" side of the controller: requests are processed
//! one at a time, so the collection needs no lock.
//!
//! Remote calls are *not* awaited inline. Each one is spawned and its completion comes back
//! through a second channel, which keeps the controller responsive while requests are in
//! flight and lets a fetch and a delete genuinely race. [`Generation`] decides which fetch
//! results are still fresh enough to apply.

use crate::client::ListClient;
use crate::entity::Entity;
use crate::error::{RemoteError, SyncError};
use crate::generation::{Generation, Ticket};
use crate::message::{ListRequest, LoadOutcome, Response};
use crate::notifier::Notifier;
use crate::remote::RemoteStore;
use crate::resource::{Ack, Reply, Resource};
use crate::session::EditSession;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// What a controller does when its task starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mount {
    /// Fetch the collection immediately.
    Load,
    /// Wait for an explicit `load`.
    #[default]
    Idle,
}

/// Finished remote call, routed back into the controller loop.
enum Completion<T: Entity> {
    Loaded {
        ticket: Ticket,
        result: Result<Vec<Resource<T>>, RemoteError>,
        then: AfterLoad<T>,
    },
    Created {
        result: Result<Reply<T>, RemoteError>,
        respond_to: Response<Reply<T>>,
    },
    Updated {
        id: T::Id,
        fields: T,
        result: Result<Reply<T>, RemoteError>,
        respond_to: Response<Resource<T>>,
    },
    Removed {
        id: T::Id,
        result: Result<Ack, RemoteError>,
        respond_to: Response<Ack>,
    },
    /// The remote call panicked; its caller sees a dropped response.
    Aborted,
}

/// Who is waiting on a fetch.
enum AfterLoad<T: Entity> {
    Mount,
    Respond(Response<LoadOutcome>),
    Created {
        reply: Reply<T>,
        respond_to: Response<Reply<T>>,
    },
    Updated {
        id: T::Id,
        fallback: T,
        respond_to: Response<Resource<T>>,
    },
}

impl<T: Entity> AfterLoad<T> {
    /// A reload that follows a committed write must land, however often it is overtaken.
    fn must_converge(&self) -> bool {
        matches!(self, AfterLoad::Created { .. } | AfterLoad::Updated { .. })
    }
}

/// The generic controller that keeps one collection in sync with the remote API.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ListActor::new()` returns the actor and its [`ListClient`].
/// 2.  **Run**: spawn `actor.run(mount)` in a background task.
/// 3.  **Use**: clone the client wherever the screen needs it.
///
/// ```ignore
/// let (actor, client) = ListActor::<Category>::new(32, store, notifier);
/// tokio::spawn(actor.run(Mount::Load));
/// let categories = client.snapshot().await?;
/// ```
///
/// # Reconciliation
///
/// * **Create**: validated locally, sent, then the collection is re-fetched. Nothing is
///   inserted optimistically.
/// * **Update**: the server's returned record replaces the entry in place. A bare message
///   reply triggers a re-fetch instead.
/// * **Remove**: the entry is dropped locally once the server confirms.
///
/// A re-fetch that follows a create or update is issued again if newer state overtakes it.
///
/// Failures leave the collection and the edit session exactly as they were.
pub struct ListActor<T: Entity> {
    receiver: mpsc::Receiver<ListRequest<T>>,
    completions: mpsc::UnboundedReceiver<Completion<T>>,
    completion_tx: mpsc::UnboundedSender<Completion<T>>,
    store: Arc<dyn RemoteStore<T>>,
    notifier: Notifier,
    collection: Vec<Resource<T>>,
    session: EditSession<T>,
    generation: Generation,
    in_flight: usize,
}

impl<T: Entity> ListActor<T> {
    /// Creates a new `ListActor` and its associated `ListClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn RemoteStore<T>>,
        notifier: Notifier,
    ) -> (Self, ListClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_tx, completions) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            completions,
            completion_tx,
            store,
            notifier,
            collection: Vec::new(),
            session: EditSession::new(),
            generation: Generation::new(),
            in_flight: 0,
        };
        (actor, ListClient::new(sender))
    }

    /// Runs the controller loop until every client is dropped and no request is in flight.
    pub async fn run(mut self, mount: Mount) {
        let entity_type = T::LABEL;
        info!(entity_type, ?mount, "Controller started");

        if mount == Mount::Load {
            self.spawn_load(AfterLoad::Mount);
        }

        let mut accepting = true;
        loop {
            if !accepting && self.in_flight == 0 {
                break;
            }
            tokio::select! {
                request = self.receiver.recv(), if accepting => match request {
                    Some(request) => self.handle_request(request),
                    None => accepting = false,
                },
                Some(done) = self.completions.recv() => {
                    self.in_flight -= 1;
                    self.handle_completion(done);
                }
                else => break,
            }
        }

        info!(entity_type, size = self.collection.len(), "Shutdown");
    }

    fn handle_request(&mut self, request: ListRequest<T>) {
        let entity_type = T::LABEL;
        match request {
            ListRequest::Load { respond_to } => {
                self.spawn_load(AfterLoad::Respond(respond_to));
            }
            ListRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.collection.clone()));
            }
            ListRequest::Begin { id, respond_to } => {
                let result = match self.collection.iter().find(|item| item.id == id) {
                    Some(item) => {
                        let discarded = self.session.begin(id.clone(), &item.fields);
                        if let Some((previous, _)) = &discarded {
                            debug!(entity_type, %previous, %id, "Discarded uncommitted edit");
                        }
                        debug!(entity_type, %id, "Edit started");
                        Ok(discarded.map(|(_, fields)| fields))
                    }
                    None => {
                        warn!(entity_type, %id, "Not found");
                        Err(SyncError::NotFound(id.to_string()))
                    }
                };
                let _ = respond_to.send(result);
            }
            ListRequest::Edit {
                field,
                value,
                respond_to,
            } => {
                let result = self.session.update(&field, &value);
                if let Err(e) = &result {
                    debug!(entity_type, %field, error = %e, "Edit rejected");
                }
                let _ = respond_to.send(result);
            }
            ListRequest::Session { respond_to } => {
                let _ = respond_to.send(Ok(self.session.snapshot()));
            }
            ListRequest::Cancel { respond_to } => {
                if let Some((id, _)) = self.session.cancel() {
                    debug!(entity_type, %id, "Edit cancelled");
                }
                let _ = respond_to.send(Ok(()));
            }
            ListRequest::Save { respond_to } => match self.session.commit() {
                Ok((id, fields)) => self.start_update(id, fields, respond_to),
                Err(e) => {
                    let _ = respond_to.send(Err(e));
                }
            },
            ListRequest::Update {
                id,
                fields,
                respond_to,
            } => self.start_update(id, fields, respond_to),
            ListRequest::Create { fields, respond_to } => {
                debug!(entity_type, ?fields, "Create");
                if let Err(e) = fields.validate() {
                    warn!(entity_type, error = %e, "Create rejected locally");
                    self.notifier.failure(e.to_string());
                    let _ = respond_to.send(Err(e.into()));
                    return;
                }
                let store = Arc::clone(&self.store);
                self.dispatch(async move {
                    let result = store.create(fields).await;
                    Completion::Created { result, respond_to }
                });
            }
            ListRequest::Remove { id, respond_to } => {
                debug!(entity_type, %id, "Remove");
                let store = Arc::clone(&self.store);
                self.dispatch(async move {
                    let result = store.remove(id.clone()).await;
                    Completion::Removed {
                        id,
                        result,
                        respond_to,
                    }
                });
            }
        }
    }

    fn start_update(&mut self, id: T::Id, mut fields: T, respond_to: Response<Resource<T>>) {
        let entity_type = T::LABEL;
        debug!(entity_type, %id, ?fields, "Update");
        if let Err(e) = fields.validate() {
            warn!(entity_type, %id, error = %e, "Update rejected locally");
            self.notifier.failure(e.to_string());
            let _ = respond_to.send(Err(e.into()));
            return;
        }
        if let Some(current) = self.collection.iter().find(|item| item.id == id) {
            fields.prepare_update(&current.fields);
        }
        let store = Arc::clone(&self.store);
        self.dispatch(async move {
            let result = store.update(id.clone(), fields.clone()).await;
            Completion::Updated {
                id,
                fields,
                result,
                respond_to,
            }
        });
    }

    fn spawn_load(&mut self, then: AfterLoad<T>) {
        let ticket = self.generation.issue();
        debug!(entity_type = T::LABEL, ?ticket, "Load issued");
        let store = Arc::clone(&self.store);
        self.dispatch(async move {
            let result = store.list().await;
            Completion::Loaded {
                ticket,
                result,
                then,
            }
        });
    }

    fn dispatch(&mut self, work: impl Future<Output = Completion<T>> + Send + 'static) {
        let completion_tx = self.completion_tx.clone();
        self.in_flight += 1;
        let task = tokio::spawn(work);
        tokio::spawn(async move {
            let done = match task.await {
                Ok(done) => done,
                Err(e) => {
                    error!(entity_type = T::LABEL, error = %e, "Remote call aborted");
                    Completion::Aborted
                }
            };
            let _ = completion_tx.send(done);
        });
    }

    fn handle_completion(&mut self, done: Completion<T>) {
        let entity_type = T::LABEL;
        match done {
            Completion::Loaded {
                ticket,
                result,
                then,
            } => {
                let outcome = match result {
                    Ok(items) if self.generation.is_current(ticket) => {
                        self.generation.mark_applied(ticket);
                        self.collection = items;
                        info!(entity_type, size = self.collection.len(), "Loaded");
                        Ok(LoadOutcome::Applied {
                            count: self.collection.len(),
                        })
                    }
                    Ok(_) if then.must_converge() => {
                        debug!(entity_type, ?ticket, "Reload overtaken, re-fetching");
                        self.spawn_load(then);
                        return;
                    }
                    Ok(_) => {
                        debug!(entity_type, ?ticket, "Discarded stale fetch");
                        Ok(LoadOutcome::Superseded)
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Load failed");
                        self.notifier
                            .failure(format!("Failed to fetch {}.", T::PLURAL));
                        Err(SyncError::Remote(e))
                    }
                };
                self.finish_load(then, outcome);
            }
            Completion::Created { result, respond_to } => match result {
                Ok(reply) => {
                    info!(entity_type, "Created");
                    self.notifier.success(
                        reply
                            .message()
                            .map(str::to_owned)
                            .unwrap_or_else(|| format!("{} added successfully!", title(T::LABEL))),
                    );
                    self.spawn_load(AfterLoad::Created { reply, respond_to });
                }
                Err(e) => {
                    warn!(entity_type, error = %e, "Create failed");
                    self.report_failure(&e, "add");
                    let _ = respond_to.send(Err(e.into()));
                }
            },
            Completion::Updated {
                id,
                fields,
                result,
                respond_to,
            } => match result {
                Ok(Reply::Record(resource)) => {
                    self.generation.record_mutation();
                    match self.collection.iter_mut().find(|item| item.id == resource.id) {
                        Some(slot) => *slot = resource.clone(),
                        None => debug!(entity_type, id = %resource.id, "Updated record no longer listed"),
                    }
                    self.session.finish(&id);
                    info!(entity_type, %id, "Updated");
                    self.notifier
                        .success(format!("{} updated successfully!", title(T::LABEL)));
                    let _ = respond_to.send(Ok(resource));
                }
                Ok(Reply::Message(message)) => {
                    self.session.finish(&id);
                    info!(entity_type, %id, "Updated, re-fetching");
                    self.notifier.success(message);
                    self.spawn_load(AfterLoad::Updated {
                        id,
                        fallback: fields,
                        respond_to,
                    });
                }
                Err(e) => {
                    warn!(entity_type, %id, error = %e, "Update failed");
                    self.report_failure(&e, "update");
                    let _ = respond_to.send(Err(e.into()));
                }
            },
            Completion::Removed {
                id,
                result,
                respond_to,
            } => match result {
                Ok(ack) => {
                    self.generation.record_mutation();
                    self.collection.retain(|item| item.id != id);
                    if self.session.finish(&id) {
                        debug!(entity_type, %id, "Edit cancelled by delete");
                    }
                    info!(entity_type, %id, size = self.collection.len(), "Deleted");
                    self.notifier.success(
                        ack.message
                            .clone()
                            .unwrap_or_else(|| format!("{} deleted successfully!", title(T::LABEL))),
                    );
                    let _ = respond_to.send(Ok(ack));
                }
                Err(e) => {
                    warn!(entity_type, %id, error = %e, "Delete failed");
                    self.report_failure(&e, "delete");
                    let _ = respond_to.send(Err(e.into()));
                }
            },
            Completion::Aborted => {}
        }
    }

    fn finish_load(&mut self, then: AfterLoad<T>, outcome: Result<LoadOutcome, SyncError>) {
        match then {
            AfterLoad::Mount => {}
            AfterLoad::Respond(respond_to) => {
                let _ = respond_to.send(outcome);
            }
            // The create itself succeeded; a failed re-fetch was already reported.
            AfterLoad::Created { reply, respond_to } => {
                let _ = respond_to.send(Ok(reply));
            }
            AfterLoad::Updated {
                id,
                fallback,
                respond_to,
            } => {
                // Without a fresh listing the local entry predates the write.
                let listed = match outcome {
                    Ok(LoadOutcome::Applied { .. }) => {
                        self.collection.iter().find(|item| item.id == id).cloned()
                    }
                    _ => None,
                };
                let resource = listed.unwrap_or(Resource {
                    id,
                    fields: fallback,
                });
                let _ = respond_to.send(Ok(resource));
            }
        }
    }

    fn report_failure(&self, error: &RemoteError, verb: &str) {
        let message = error
            .server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Failed to {} {}.", verb, T::LABEL));
        self.notifier.failure(message);
    }
}

fn title(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
