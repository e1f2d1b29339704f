//! # Remote API
//!
//! Route table and request shapes of the back-office API, plus the traits for the
//! endpoints that are not plain collections (login and profile).
//!
//! | entity   | list                 | create                     | update / delete         |
//! |----------|----------------------|----------------------------|-------------------------|
//! | category | `GET api/categories` | `POST api/category` (JSON) | `PUT/DELETE api/category/{id}` |
//! | product  | `GET api/products`   | `POST api/products` (multipart) | `PUT/DELETE api/product/{id}` |
//! | offer    | `GET api/offers`     | `POST api/offers` (JSON)   | `PUT/DELETE api/offer/{id}` |
//! | order    | `GET api/confirm`    |                            |                         |
//!
//! [`HttpBackend`] implements every trait here over `reqwest`.

pub mod http;

pub use http::HttpBackend;

use crate::model::{Category, Offer, Order, Product, Profile, ProfileForm, ResourceId};
use async_trait::async_trait;
use resource_sync::{Entity, RemoteError, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub const LOGIN_PATH: &str = "admin";
pub const PROFILE_PATH: &str = "api/user";
pub const PROFILE_UPDATE_PATH: &str = "api/user/update";

/// A record type readable with a single `GET`.
pub trait Listed: DeserializeOwned + Send + 'static {
    const LIST_PATH: &'static str;
}

/// An entity with full CRUD routes.
pub trait Endpoint: Entity<Id = ResourceId> {
    const LIST_PATH: &'static str;
    const CREATE_PATH: &'static str;
    /// Prefix of `PUT`/`DELETE` routes; the id is appended.
    const ITEM_PATH: &'static str;

    fn create_body(&self) -> Result<Body, serde_json::Error> {
        serde_json::to_value(self).map(Body::Json)
    }
}

impl<T: Endpoint> Listed for Resource<T> {
    const LIST_PATH: &'static str = T::LIST_PATH;
}

impl Listed for Order {
    const LIST_PATH: &'static str = "api/confirm";
}

impl Endpoint for Category {
    const LIST_PATH: &'static str = "api/categories";
    const CREATE_PATH: &'static str = "api/category";
    const ITEM_PATH: &'static str = "api/category";
}

impl Endpoint for Offer {
    const LIST_PATH: &'static str = "api/offers";
    const CREATE_PATH: &'static str = "api/offers";
    const ITEM_PATH: &'static str = "api/offer";
}

impl Endpoint for Product {
    const LIST_PATH: &'static str = "api/products";
    const CREATE_PATH: &'static str = "api/products";
    const ITEM_PATH: &'static str = "api/product";

    fn create_body(&self) -> Result<Body, serde_json::Error> {
        let mut parts: Vec<FormPart> = self
            .form_fields()
            .into_iter()
            .map(|(name, value)| FormPart::Text { name, value })
            .collect();
        if let Some(upload) = &self.upload {
            parts.push(FormPart::File {
                name: "productImage",
                file_name: upload.file_name.clone(),
                mime: upload.mime.clone(),
                bytes: upload.bytes.clone(),
            });
        }
        Ok(Body::Multipart(parts))
    }
}

/// Encoded request body of a create.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl fmt::Debug for FormPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormPart::Text { name, value } => write!(f, "{}={:?}", name, value),
            FormPart::File {
                name,
                file_name,
                bytes,
                ..
            } => write!(f, "{}=<{} {} bytes>", name, file_name, bytes.len()),
        }
    }
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Posts credentials. Returns the server's greeting on success.
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>, RemoteError>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self) -> Result<Profile, RemoteError>;

    /// Returns the server's confirmation message, if it sent one.
    async fn update_profile(&self, form: &ProfileForm) -> Result<Option<String>, RemoteError>;
}
