//! # Console Lifecycle & Orchestration
//!
//! [`Console`] starts one list controller per managed entity, wires them to a shared
//! [`Notifier`], and stops them again on shutdown.
//!
//! ## Startup
//!
//! 1. **Backend** - [`Backend::http`] builds one `reqwest` client and hands it to every
//!    screen as a trait object. Tests pass a [`Backend`] of mocks instead.
//! 2. **Controllers** - category, product, and offer controllers are spawned with the
//!    configured [`Mount`].
//! 3. **Gate** - every view accessor checks the [`AuthGate`] first. With `Mount::Idle`
//!    the lists are fetched on the first successful login.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the request channels
//! 2. **Controllers drain** - in-flight remote calls finish and are applied
//! 3. **Await completion** - every controller task is joined

use crate::api::{AuthApi, HttpBackend, ProfileApi};
use crate::auth::AuthGate;
use crate::clients::{self, CategoryClient, OfferClient, ProductClient};
use crate::config::ConsoleConfig;
use crate::dashboard::{self, Dataset};
use crate::error::ConsoleError;
use crate::model::{Category, Offer, Order, Product};
use crate::orders::OrderBook;
use crate::profile::ProfileScreen;
use resource_sync::{Mount, Notifier, RemoteSource, RemoteStore, ScreenClient};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Everything the console talks to.
#[derive(Clone)]
pub struct Backend {
    pub categories: Arc<dyn RemoteStore<Category>>,
    pub products: Arc<dyn RemoteStore<Product>>,
    pub offers: Arc<dyn RemoteStore<Offer>>,
    pub orders: Arc<dyn RemoteSource<Order>>,
    pub auth: Arc<dyn AuthApi>,
    pub profile: Arc<dyn ProfileApi>,
}

impl Backend {
    pub fn http(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let http = Arc::new(HttpBackend::new(config.base_url.clone())?);
        Ok(Self {
            categories: http.clone(),
            products: http.clone(),
            offers: http.clone(),
            orders: http.clone(),
            auth: http.clone(),
            profile: http,
        })
    }
}

pub struct Console {
    config: ConsoleConfig,
    notifier: Notifier,
    auth: AuthGate,
    categories: CategoryClient,
    products: ProductClient,
    offers: OfferClient,
    orders: OrderBook,
    profile: Arc<dyn ProfileApi>,
    handles: Vec<JoinHandle<()>>,
}

impl Console {
    /// Spawns the list controllers. Must be called inside a Tokio runtime.
    pub fn start(config: ConsoleConfig, backend: Backend) -> Self {
        let notifier = Notifier::new(config.notice_ttl);
        let size = config.buffer_size;

        let (category_actor, categories) =
            clients::new(size, backend.categories, notifier.clone(), CategoryClient::new);
        let (product_actor, products) =
            clients::new(size, backend.products, notifier.clone(), ProductClient::new);
        let (offer_actor, offers) =
            clients::new(size, backend.offers, notifier.clone(), OfferClient::new);

        let handles = vec![
            tokio::spawn(category_actor.run(config.mount)),
            tokio::spawn(product_actor.run(config.mount)),
            tokio::spawn(offer_actor.run(config.mount)),
        ];
        info!(base_url = %config.base_url, mount = ?config.mount, "Console started");

        Self {
            auth: AuthGate::new(backend.auth, notifier.clone()),
            orders: OrderBook::new(backend.orders, notifier.clone()),
            profile: backend.profile,
            config,
            notifier,
            categories,
            products,
            offers,
            handles,
        }
    }

    /// Logs in and, unless the lists fetched at startup, loads every list.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ConsoleError> {
        let message = self.auth.login(username, password).await?;
        if self.config.mount == Mount::Idle {
            self.refresh().await;
        }
        Ok(message)
    }

    /// Re-fetches the three lists concurrently. Failures are already on the notice board.
    pub async fn refresh(&self) {
        let (categories, products, offers) = tokio::join!(
            self.categories.load(),
            self.products.load(),
            self.offers.load()
        );
        for (screen, result) in [
            ("categories", categories),
            ("products", products),
            ("offers", offers),
        ] {
            if let Err(e) = result {
                warn!(screen, error = %e, "Refresh failed");
            }
        }
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn categories(&self) -> Result<&CategoryClient, ConsoleError> {
        self.auth.require()?;
        Ok(&self.categories)
    }

    pub fn products(&self) -> Result<&ProductClient, ConsoleError> {
        self.auth.require()?;
        Ok(&self.products)
    }

    pub fn offers(&self) -> Result<&OfferClient, ConsoleError> {
        self.auth.require()?;
        Ok(&self.offers)
    }

    pub fn orders(&self) -> Result<&OrderBook, ConsoleError> {
        self.auth.require()?;
        Ok(&self.orders)
    }

    /// A fresh settings screen; call `load` on it to fill the form.
    pub fn profile(&self) -> Result<ProfileScreen, ConsoleError> {
        self.auth.require()?;
        Ok(ProfileScreen::new(
            Arc::clone(&self.profile),
            self.notifier.clone(),
        ))
    }

    pub fn dashboard(&self) -> Result<[Dataset; 4], ConsoleError> {
        self.auth.require()?;
        Ok(dashboard::datasets())
    }

    /// Drops every client and waits for the controllers to finish.
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        let Console {
            categories,
            products,
            offers,
            handles,
            ..
        } = self;
        drop(categories);
        drop(products);
        drop(offers);

        for handle in handles {
            handle
                .await
                .map_err(|e| ConsoleError::Shutdown(e.to_string()))?;
        }
        info!("Console stopped");
        Ok(())
    }
}
