//! # Mock Remote Store & Testing Guide
//!
//! `MockStore<T>` implements [`RemoteStore<T>`] entirely in memory. Tests queue the replies
//! the "server" should give, run a real [`ListActor`](crate::ListActor) against it, and
//! check afterwards that every reply was consumed.
//!
//! ## When to use the mock vs the HTTP backend
//!
//! | Feature | MockStore | HTTP backend |
//! |---------|-----------|--------------|
//! | **Speed** | Instant (in-memory) | Needs a server |
//! | **Determinism** | Replies are scripted | Subject to the network |
//! | **Error Injection** | Easy (`return_err`) | Needs a misbehaving server |
//! | **Races** | `hold_ok` parks a fetch until released | Hard to reproduce |
//!
//! ## Example
//!
//! ```ignore
//! let mock = MockStore::<Category>::new();
//! mock.expect_list().return_ok(vec![Resource::new("1", toys)]);
//! mock.expect_remove("1".into()).return_ok(Ack::default());
//!
//! let (actor, client) = ListActor::new(8, mock.store(), Notifier::default());
//! tokio::spawn(actor.run(Mount::Idle));
//!
//! client.load().await?;
//! client.remove("1".into(), &|_: &str| true).await?;
//! mock.verify();
//! ```
//!
//! Expectations are queued per operation kind, so a fetch and a delete racing on different
//! tasks each find their own reply regardless of which one reaches the store first.

use crate::entity::Entity;
use crate::error::RemoteError;
use crate::remote::{RemoteSource, RemoteStore};
use crate::resource::{Ack, Reply, Resource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{oneshot, Notify};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<T: Entity> {
    List,
    Create(T),
    Update(T::Id, T),
    Remove(T::Id),
}

struct Gate {
    started: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

struct ListExpectation<T: Entity> {
    response: Result<Vec<Resource<T>>, RemoteError>,
    gate: Option<Gate>,
}

struct State<T: Entity> {
    lists: VecDeque<ListExpectation<T>>,
    creates: VecDeque<Result<Reply<T>, RemoteError>>,
    updates: VecDeque<(T::Id, Result<Reply<T>, RemoteError>)>,
    removes: VecDeque<(T::Id, Result<Ack, RemoteError>)>,
    calls: Vec<Call<T>>,
    unexpected: Vec<String>,
}

impl<T: Entity> State<T> {
    fn unexpected(&mut self, what: String) -> RemoteError {
        tracing::error!(request = %what, "Unexpected request");
        self.unexpected.push(what);
        RemoteError::Transport("unexpected request".to_string())
    }
}

/// A scripted remote store with expectation tracking for fluent testing.
pub struct MockStore<T: Entity> {
    state: Arc<Mutex<State<T>>>,
}

impl<T: Entity> Clone for MockStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Entity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MockStore<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                lists: VecDeque::new(),
                creates: VecDeque::new(),
                updates: VecDeque::new(),
                removes: VecDeque::new(),
                calls: Vec::new(),
                unexpected: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        lock_state(&self.state)
    }

    /// The mock as the trait object controllers take.
    pub fn store(&self) -> Arc<dyn RemoteStore<T>> {
        Arc::new(self.clone())
    }

    /// Expects a `list` request.
    pub fn expect_list(&self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            state: Arc::clone(&self.state),
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            state: Arc::clone(&self.state),
        }
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            state: Arc::clone(&self.state),
        }
    }

    /// Expects a `remove` request for `id`.
    pub fn expect_remove(&self, id: T::Id) -> RemoveExpectationBuilder<T> {
        RemoveExpectationBuilder {
            id,
            state: Arc::clone(&self.state),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<Call<T>> {
        self.lock().calls.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.lock();
        let remaining =
            state.lists.len() + state.creates.len() + state.updates.len() + state.removes.len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
    }
}

#[async_trait]
impl<T: Entity> RemoteSource<Resource<T>> for MockStore<T> {
    async fn list(&self) -> Result<Vec<Resource<T>>, RemoteError> {
        let expectation = {
            let mut state = self.lock();
            state.calls.push(Call::List);
            match state.lists.pop_front() {
                Some(expectation) => expectation,
                None => return Err(state.unexpected("list".to_string())),
            }
        };
        if let Some(gate) = expectation.gate {
            gate.started.notify_one();
            let _ = gate.release.await;
        }
        expectation.response
    }
}

#[async_trait]
impl<T: Entity> RemoteStore<T> for MockStore<T> {
    async fn create(&self, fields: T) -> Result<Reply<T>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(Call::Create(fields));
        match state.creates.pop_front() {
            Some(response) => response,
            None => Err(state.unexpected("create".to_string())),
        }
    }

    async fn update(&self, id: T::Id, fields: T) -> Result<Reply<T>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(Call::Update(id.clone(), fields));
        let expected = state.updates.front().is_some_and(|(next, _)| *next == id);
        match state.updates.pop_front() {
            Some((_, response)) if expected => response,
            Some(other) => {
                state.updates.push_front(other);
                Err(state.unexpected(format!("update {}", id)))
            }
            None => Err(state.unexpected(format!("update {}", id))),
        }
    }

    async fn remove(&self, id: T::Id) -> Result<Ack, RemoteError> {
        let mut state = self.lock();
        state.calls.push(Call::Remove(id.clone()));
        let expected = state.removes.front().is_some_and(|(next, _)| *next == id);
        match state.removes.pop_front() {
            Some((_, response)) if expected => response,
            Some(other) => {
                state.removes.push_front(other);
                Err(state.unexpected(format!("remove {}", id)))
            }
            None => Err(state.unexpected(format!("remove {}", id))),
        }
    }
}

fn lock_state<T: Entity>(state: &Mutex<State<T>>) -> MutexGuard<'_, State<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: Entity> {
    state: Arc<Mutex<State<T>>>,
}

impl<T: Entity> ListExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<Resource<T>>) {
        lock_state(&self.state).lists.push_back(ListExpectation {
            response: Ok(items),
            gate: None,
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RemoteError) {
        lock_state(&self.state).lists.push_back(ListExpectation {
            response: Err(error),
            gate: None,
        });
    }

    /// Answers with `items`, but only once the returned handle is released.
    pub fn hold_ok(self, items: Vec<Resource<T>>) -> HeldResponse {
        let started = Arc::new(Notify::new());
        let (release, gate_rx) = oneshot::channel();
        lock_state(&self.state).lists.push_back(ListExpectation {
            response: Ok(items),
            gate: Some(Gate {
                started: Arc::clone(&started),
                release: gate_rx,
            }),
        });
        HeldResponse { started, release }
    }
}

/// A fetch parked inside the mock.
pub struct HeldResponse {
    started: Arc<Notify>,
    release: oneshot::Sender<()>,
}

impl HeldResponse {
    /// Resolves once the held request has reached the store.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Lets the held request answer.
    pub fn release(self) {
        let _ = self.release.send(());
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: Entity> {
    state: Arc<Mutex<State<T>>>,
}

impl<T: Entity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, reply: Reply<T>) {
        lock_state(&self.state).creates.push_back(Ok(reply));
    }

    pub fn return_err(self, error: RemoteError) {
        lock_state(&self.state).creates.push_back(Err(error));
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: Entity> {
    id: T::Id,
    state: Arc<Mutex<State<T>>>,
}

impl<T: Entity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, reply: Reply<T>) {
        lock_state(&self.state).updates.push_back((self.id, Ok(reply)));
    }

    pub fn return_err(self, error: RemoteError) {
        lock_state(&self.state).updates.push_back((self.id, Err(error)));
    }
}

/// Builder for `remove` expectations.
pub struct RemoveExpectationBuilder<T: Entity> {
    id: T::Id,
    state: Arc<Mutex<State<T>>>,
}

impl<T: Entity> RemoveExpectationBuilder<T> {
    pub fn return_ok(self, ack: Ack) {
        lock_state(&self.state).removes.push_back((self.id, Ok(ack)));
    }

    pub fn return_err(self, error: RemoteError) {
        lock_state(&self.state).removes.push_back((self.id, Err(error)));
    }
}
