//! Lenient decoding for values the API is loose about.
//!
//! Numbers sometimes arrive as JSON strings (form posts stored verbatim), and dates arrive
//! either as `YYYY-MM-DD` or as a full ISO timestamp.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<N> {
    Number(N),
    Text(String),
}

/// Accepts a JSON number, a numeric string, an empty string, or null.
pub fn lenient_number<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: Deserialize<'de> + FromStr,
    N::Err: Display,
{
    match Option::<NumberOrText<N>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Accepts `YYYY-MM-DD`, a longer ISO timestamp, an empty string, or null.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => date_prefix(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", text))),
    }
}

/// The calendar date in the first ten characters of `text`.
pub fn date_prefix(text: &str) -> Option<NaiveDate> {
    let prefix = text.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Null or missing strings decode as empty.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
