//! # Auth Gate
//!
//! A process-wide "logged in" flag. There is no token: the API answers a login with a
//! greeting, and the console simply opens its views until the user logs out.
//!
//! The flag lives in a `watch` channel so views can observe it; [`AuthGate::require`] is the
//! check every gated accessor of [`Console`](crate::lifecycle::Console) runs first.

use crate::api::{AuthApi, Credentials};
use crate::error::ConsoleError;
use resource_sync::{Confirm, Notifier, RemoteError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

#[derive(Clone)]
pub struct AuthGate {
    state: Arc<watch::Sender<bool>>,
    api: Arc<dyn AuthApi>,
    notifier: Notifier,
}

impl AuthGate {
    pub fn new(api: Arc<dyn AuthApi>, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
            api,
            notifier,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.state.borrow()
    }

    /// Observe login state changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    pub fn require(&self) -> Result<(), ConsoleError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ConsoleError::LoginRequired)
        }
    }

    /// Posts the credentials and opens the gate on success. Returns the server's greeting.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ConsoleError> {
        let credentials = Credentials::new(username, password);
        match self.api.login(&credentials).await {
            Ok(message) => {
                let message = message.unwrap_or_else(|| "Login successful".to_string());
                self.state.send_replace(true);
                info!("Logged in");
                self.notifier.success(message.clone());
                Ok(message)
            }
            Err(RemoteError::Rejected { status, message }) => {
                let message = message.unwrap_or_else(|| "Login failed".to_string());
                warn!(status, "Login rejected");
                self.notifier.failure(message.clone());
                Err(ConsoleError::LoginRejected(message))
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.notifier.failure("Server error");
                Err(ConsoleError::Remote(e))
            }
        }
    }

    /// Closes the gate if the user confirms. Returns whether the user was logged out.
    pub fn logout(&self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(LOGOUT_PROMPT) {
            return false;
        }
        self.state.send_replace(false);
        info!("Logged out");
        true
    }
}
