use super::wire;
use resource_sync::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The admin account as the API reports it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub email: String,
}

/// The settings form. The password is never prefilled from the server.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ProfileForm {
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "username" => self.username = value.to_string(),
            "email" => self.email = value.to_string(),
            "password" => self.password = value.to_string(),
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }
}

impl From<Profile> for ProfileForm {
    fn from(profile: Profile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
            password: String::new(),
        }
    }
}

impl fmt::Debug for ProfileForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
