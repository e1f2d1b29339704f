//! # Domain Models
//!
//! Record types of the back office, each with its wire representation.
//!
//! Category, product, and offer implement [`Entity`](resource_sync::Entity) and are managed by
//! a list controller. Orders and the admin profile are read through dedicated screens.

pub mod category;
pub mod offer;
pub mod order;
pub mod product;
pub mod profile;
pub mod wire;

pub use category::Category;
pub use offer::Offer;
pub use order::{DeliveryInfo, Order};
pub use product::{ImageUpload, Product};
pub use profile::{Profile, ProfileForm};

use chrono::NaiveDate;
use resource_sync::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier (`_id`). Opaque to the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Parses an optional numeric form value. Blank input clears the field.
pub(crate) fn parse_number<N: FromStr>(
    field: &'static str,
    value: &str,
) -> Result<Option<N>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| FieldError::Invalid {
        field,
        value: value.to_string(),
    })
}

/// Parses an optional `YYYY-MM-DD` form value. Longer ISO timestamps are cut to the date.
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    wire::date_prefix(value).map(Some).ok_or_else(|| FieldError::Invalid {
        field,
        value: value.to_string(),
    })
}
