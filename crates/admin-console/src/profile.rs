//! Admin profile settings screen.

use crate::api::ProfileApi;
use crate::error::ConsoleError;
use crate::model::ProfileForm;
use resource_sync::{FieldError, Notifier};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct ProfileScreen {
    api: Arc<dyn ProfileApi>,
    notifier: Notifier,
    form: ProfileForm,
}

impl ProfileScreen {
    pub fn new(api: Arc<dyn ProfileApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            form: ProfileForm::default(),
        }
    }

    /// Fills the form from the server. The password field is left blank.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        match self.api.fetch_profile().await {
            Ok(profile) => {
                self.form = profile.into();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load user data");
                Err(e.into())
            }
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        self.form.set_field(name, value)
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<String, ConsoleError> {
        match self.api.update_profile(&self.form).await {
            Ok(message) => {
                let message = message.unwrap_or_else(|| "Updated successfully".to_string());
                info!("Profile updated");
                self.notifier.success(message.clone());
                Ok(message)
            }
            Err(e) => {
                warn!(error = %e, "Update failed");
                self.notifier.failure("An error occurred while updating.");
                Err(e.into())
            }
        }
    }
}
