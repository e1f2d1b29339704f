//! HTTP backend for the remote API

use super::{AuthApi, Body, Credentials, Endpoint, FormPart, Listed, ProfileApi};
use super::{LOGIN_PATH, PROFILE_PATH, PROFILE_UPDATE_PATH};
use crate::model::{Profile, ProfileForm, ResourceId};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use resource_sync::{Ack, Entity, RemoteError, RemoteSource, RemoteStore, Reply, Resource};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// `reqwest` client bound to one API base URL. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

/// Body of a reply that carries only a message.
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// A create/update reply: just a message, or the record itself.
///
/// Entity fields all have defaults, so anything carrying `message` is read as an
/// acknowledgement before it is tried as a record.
#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "T: Entity"))]
enum WireReply<T: Entity> {
    Message { message: String },
    Record(Resource<T>),
}

impl<T: Entity> From<WireReply<T>> for Reply<T> {
    fn from(reply: WireReply<T>) -> Self {
        match reply {
            WireReply::Record(resource) => Reply::Record(resource),
            WireReply::Message { message } => Reply::Message(message),
        }
    }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn item_url<T: Endpoint>(&self, id: &ResourceId) -> String {
        self.url(&format!("{}/{}", T::ITEM_PATH, id))
    }

    async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
        request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))
    }

    /// Reads the body. Non-success statuses become `Rejected`, with the server's
    /// `message` when the body has one.
    async fn read_body(response: Response) -> Result<String, RemoteError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageBody>(&text)
                .ok()
                .and_then(|body| body.message);
            debug!(status = status.as_u16(), ?message, "Request rejected");
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(text)
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let text = Self::read_body(response).await?;
        serde_json::from_str(&text).map_err(|e| RemoteError::Malformed(e.to_string()))
    }

    /// Like `handle_response`, but any success body is acceptable.
    async fn handle_message(response: Response) -> Result<Option<String>, RemoteError> {
        let text = Self::read_body(response).await?;
        Ok(serde_json::from_str::<MessageBody>(&text)
            .unwrap_or_default()
            .message)
    }

    fn with_body(request: RequestBuilder, body: Body) -> Result<RequestBuilder, RemoteError> {
        match body {
            Body::Json(value) => Ok(request.json(&value)),
            Body::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = match part {
                        FormPart::Text { name, value } => form.text(name, value),
                        FormPart::File {
                            name,
                            file_name,
                            mime,
                            bytes,
                        } => {
                            let file = Part::bytes(bytes)
                                .file_name(file_name)
                                .mime_str(&mime)
                                .map_err(|e| RemoteError::Malformed(e.to_string()))?;
                            form.part(name, file)
                        }
                    };
                }
                Ok(request.multipart(form))
            }
        }
    }
}

#[async_trait]
impl<R: Listed> RemoteSource<R> for HttpBackend {
    async fn list(&self) -> Result<Vec<R>, RemoteError> {
        let url = self.url(R::LIST_PATH);
        debug!(%url, "GET");
        let response = Self::send(self.client.get(&url)).await?;
        Self::handle_response(response).await
    }
}

#[async_trait]
impl<T: Endpoint> RemoteStore<T> for HttpBackend {
    async fn create(&self, fields: T) -> Result<Reply<T>, RemoteError> {
        let url = self.url(T::CREATE_PATH);
        debug!(%url, "POST");
        let body = fields
            .create_body()
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let request = Self::with_body(self.client.post(&url), body)?;
        let response = Self::send(request).await?;
        Self::handle_response::<WireReply<T>>(response)
            .await
            .map(Reply::from)
    }

    async fn update(&self, id: T::Id, fields: T) -> Result<Reply<T>, RemoteError> {
        let url = self.item_url::<T>(&id);
        debug!(%url, "PUT");
        let response = Self::send(self.client.put(&url).json(&fields)).await?;
        Self::handle_response::<WireReply<T>>(response)
            .await
            .map(Reply::from)
    }

    async fn remove(&self, id: T::Id) -> Result<Ack, RemoteError> {
        let url = self.item_url::<T>(&id);
        debug!(%url, "DELETE");
        let response = Self::send(self.client.delete(&url)).await?;
        let message = Self::handle_message(response).await?;
        Ok(Ack { message })
    }
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>, RemoteError> {
        let url = self.url(LOGIN_PATH);
        debug!(%url, username = %credentials.username, "POST");
        let response = Self::send(self.client.post(&url).json(credentials)).await?;
        Self::handle_message(response).await
    }
}

#[async_trait]
impl ProfileApi for HttpBackend {
    async fn fetch_profile(&self) -> Result<Profile, RemoteError> {
        let response = Self::send(self.client.get(self.url(PROFILE_PATH))).await?;
        Self::handle_response(response).await
    }

    async fn update_profile(&self, form: &ProfileForm) -> Result<Option<String>, RemoteError> {
        let response = Self::send(self.client.put(self.url(PROFILE_UPDATE_PATH)).json(form)).await?;
        Self::handle_message(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn urls_join_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.url("api/categories"), "http://localhost:5000/api/categories");
        assert_eq!(
            backend.item_url::<Category>(&ResourceId::from("c1")),
            "http://localhost:5000/api/category/c1"
        );
    }

    #[test]
    fn message_only_reply_is_not_a_record() {
        let reply: WireReply<Category> =
            serde_json::from_str(r#"{"message":"Category added successfully"}"#).unwrap();
        assert!(matches!(
            Reply::from(reply),
            Reply::Message(message) if message == "Category added successfully"
        ));
    }

    #[test]
    fn message_with_id_is_still_a_message() {
        let reply: WireReply<Category> =
            serde_json::from_str(r#"{"_id":"c1","message":"Updated"}"#).unwrap();
        assert_eq!(Reply::from(reply), Reply::Message("Updated".to_string()));
    }

    #[test]
    fn record_reply_keeps_its_fields() {
        let reply: WireReply<Category> =
            serde_json::from_str(r#"{"_id":"c1","categoryName":"Pet Toys","__v":0}"#).unwrap();
        assert_eq!(
            Reply::from(reply),
            Reply::Record(Resource::new("c1", Category::new("Pet Toys")))
        );
    }
}
