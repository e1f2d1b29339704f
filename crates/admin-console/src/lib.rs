//! # Admin Console
//!
//! Back-office client for the pet store API: categories, products, offers, orders, the
//! admin profile, and a dashboard, behind a login gate.
//!
//! ## Core Components
//!
//! - **[model]**: Record types and their wire formats ([`Category`](model::Category),
//!   [`Product`](model::Product), [`Offer`](model::Offer), [`Order`](model::Order)).
//! - **[api]**: Route table and the `reqwest` backend ([`HttpBackend`](api::HttpBackend)).
//! - **[clients]**: Type-safe screen clients over the generic list controllers.
//! - **[lifecycle]**: [`Console`](lifecycle::Console), which starts, gates, and stops everything.
//!
//! ## Quick Start
//!
//! ```ignore
//! let config = ConsoleConfig::from_env()?;
//! let console = Console::start(config.clone(), Backend::http(&config)?);
//! console.login("admin", "secret").await?;
//!
//! let categories = console.categories()?;
//! categories.begin(id).await?;
//! categories.edit("name", "Pet Toys").await?;
//! categories.save().await?;
//!
//! console.shutdown().await?;
//! ```

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod profile;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use lifecycle::{Backend, Console};
