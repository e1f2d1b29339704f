//! # Product Client
//!
//! Product screen. Adds name search over the loaded list; the create form takes its
//! category and offer suggestions from [`CategoryClient`](super::CategoryClient) and
//! [`OfferClient`](super::OfferClient).
use crate::error::ConsoleError;
use crate::model::Product;
use async_trait::async_trait;
use resource_sync::{filter, ListClient, Resource, ScreenClient, SyncError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductClient {
    inner: ListClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ListClient<Product>) -> Self {
        Self { inner }
    }

    /// Products whose name contains `term`, ignoring case. A blank term lists everything.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Resource<Product>>, ConsoleError> {
        let products = self.list().await?;
        let found: Vec<_> = filter::search(&products, term)
            .into_iter()
            .cloned()
            .collect();
        debug!(size = found.len(), "Search");
        Ok(found)
    }
}

#[async_trait]
impl ScreenClient<Product> for ProductClient {
    type Error = ConsoleError;

    fn inner(&self) -> &ListClient<Product> {
        &self.inner
    }

    fn map_error(e: SyncError) -> Self::Error {
        super::map_error(e)
    }
}
