//! # Category Client
//!
//! Category screen: add, rename, and delete categories. Also feeds the category
//! autocomplete of the product form.
use crate::error::ConsoleError;
use crate::model::Category;
use async_trait::async_trait;
use resource_sync::{filter, ListClient, ScreenClient, SyncError};

#[derive(Clone)]
pub struct CategoryClient {
    inner: ListClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ListClient<Category>) -> Self {
        Self { inner }
    }

    /// Category names matching what the user has typed so far.
    pub async fn suggest(&self, input: &str) -> Result<Vec<String>, ConsoleError> {
        let categories = self.list().await?;
        Ok(filter::suggest(&categories, input)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }
}

#[async_trait]
impl ScreenClient<Category> for CategoryClient {
    type Error = ConsoleError;

    fn inner(&self) -> &ListClient<Category> {
        &self.inner
    }

    fn map_error(e: SyncError) -> Self::Error {
        super::map_error(e)
    }
}
