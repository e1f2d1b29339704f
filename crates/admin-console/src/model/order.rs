use super::{wire, ResourceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub phone: String,
}

/// A confirmed customer order. Read-only in the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub user_id: String,
    #[serde(default, deserialize_with = "wire::lenient_number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub payment_method: String,
    #[serde(default)]
    pub delivery_info: Option<DeliveryInfo>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total in rupees with two decimals, e.g. `₹1499.00`.
    pub fn formatted_total(&self) -> String {
        match self.total {
            Some(total) => format!("₹{:.2}", total),
            None => "₹".to_string(),
        }
    }

    pub fn address(&self) -> &str {
        self.delivery_info.as_ref().map_or("", |d| d.address.as_str())
    }

    pub fn phone(&self) -> &str {
        self.delivery_info.as_ref().map_or("", |d| d.phone.as_str())
    }

    pub fn placed_on(&self) -> Option<NaiveDate> {
        self.created_at.map(|at| at.date_naive())
    }
}
