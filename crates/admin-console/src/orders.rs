//! Read-only order list.

use crate::error::ConsoleError;
use crate::model::Order;
use resource_sync::{Notifier, RemoteSource};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Confirmed orders, fetched on demand. A failed fetch keeps the previous list.
#[derive(Clone)]
pub struct OrderBook {
    source: Arc<dyn RemoteSource<Order>>,
    notifier: Notifier,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderBook {
    pub fn new(source: Arc<dyn RemoteSource<Order>>, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, ConsoleError> {
        match self.source.list().await {
            Ok(orders) => {
                let size = orders.len();
                *self.orders.write().await = orders;
                info!(size, "Loaded orders");
                Ok(size)
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                self.notifier.failure("Failed to fetch orders.");
                Err(e.into())
            }
        }
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}
