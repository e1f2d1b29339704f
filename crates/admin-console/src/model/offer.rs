use super::{parse_date, parse_number, wire, ResourceId};
use chrono::NaiveDate;
use resource_sync::{Entity, FieldError};
use serde::{Deserialize, Serialize};

/// A time-boxed discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "offerName", default, deserialize_with = "wire::null_as_empty")]
    pub name: String,
    #[serde(
        rename = "offerDiscount",
        default,
        deserialize_with = "wire::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<f64>,
    #[serde(rename = "offerDescription", default, deserialize_with = "wire::null_as_empty")]
    pub description: String,
    #[serde(
        rename = "startDate",
        default,
        deserialize_with = "wire::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        rename = "endDate",
        default,
        deserialize_with = "wire::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

impl Offer {
    /// Whether `day` falls inside the offer window, both ends inclusive.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

impl Entity for Offer {
    type Id = ResourceId;
    const LABEL: &'static str = "offer";
    const PLURAL: &'static str = "offers";
    const REQUIRED: &'static [&'static str] = &["name", "discount", "startDate", "endDate"];

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "discount" => self.discount.map(|d| d.to_string()),
            "description" => Some(self.description.clone()),
            "startDate" => self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            "endDate" => self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.to_string(),
            "discount" => self.discount = parse_number("discount", value)?,
            "description" => self.description = value.to_string(),
            "startDate" => self.start_date = parse_date("startDate", value)?,
            "endDate" => self.end_date = parse_date("endDate", value)?,
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_sync::Resource;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_timestamps_as_dates() {
        let record: Resource<Offer> = serde_json::from_value(json!({
            "_id": "o1",
            "offerName": "Diwali",
            "offerDiscount": 15,
            "offerDescription": "Festive sale",
            "startDate": "2024-10-25T00:00:00.000Z",
            "endDate": "2024-11-05T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(record.fields.start_date, Some(day(2024, 10, 25)));
        assert_eq!(record.fields.field("endDate").as_deref(), Some("2024-11-05"));
    }

    #[test]
    fn encodes_plain_dates() {
        let mut offer = Offer::default();
        offer.set_field("name", "Diwali").unwrap();
        offer.set_field("discount", "15").unwrap();
        offer.set_field("startDate", "2024-10-25").unwrap();
        offer.set_field("endDate", "2024-11-05").unwrap();
        assert_eq!(
            serde_json::to_value(&offer).unwrap(),
            json!({
                "offerName": "Diwali",
                "offerDiscount": 15.0,
                "offerDescription": "",
                "startDate": "2024-10-25",
                "endDate": "2024-11-05"
            })
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut offer = Offer::default();
        assert!(matches!(
            offer.set_field("endDate", "next week"),
            Err(FieldError::Invalid { field: "endDate", .. })
        ));
        assert_eq!(offer.end_date, None);
    }

    #[test]
    fn active_window_is_inclusive() {
        let mut offer = Offer::default();
        offer.start_date = Some(day(2024, 1, 1));
        offer.end_date = Some(day(2024, 1, 31));
        assert!(offer.is_active_on(day(2024, 1, 31)));
        assert!(!offer.is_active_on(day(2024, 2, 1)));
    }
}
