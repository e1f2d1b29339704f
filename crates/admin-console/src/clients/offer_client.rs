//! # Offer Client
//!
//! Offer screen, plus the offer autocomplete of the product form.
use crate::error::ConsoleError;
use crate::model::Offer;
use async_trait::async_trait;
use chrono::NaiveDate;
use resource_sync::{filter, ListClient, Resource, ScreenClient, SyncError};
use tracing::instrument;

#[derive(Clone)]
pub struct OfferClient {
    inner: ListClient<Offer>,
}

impl OfferClient {
    pub fn new(inner: ListClient<Offer>) -> Self {
        Self { inner }
    }

    /// Offer names matching what the user has typed so far.
    pub async fn suggest(&self, input: &str) -> Result<Vec<String>, ConsoleError> {
        let offers = self.list().await?;
        Ok(filter::suggest(&offers, input)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// Offers whose window contains `day`.
    #[instrument(skip(self))]
    pub async fn active_on(&self, day: NaiveDate) -> Result<Vec<Resource<Offer>>, ConsoleError> {
        let mut offers = self.list().await?;
        offers.retain(|offer| offer.fields.is_active_on(day));
        Ok(offers)
    }
}

#[async_trait]
impl ScreenClient<Offer> for OfferClient {
    type Error = ConsoleError;

    fn inner(&self) -> &ListClient<Offer> {
        &self.inner
    }

    fn map_error(e: SyncError) -> Self::Error {
        super::map_error(e)
    }
}
