//! # Entity Trait
//!
//! The `Entity` trait defines the contract every managed record type (category, product,
//! offer, ...) implements so a generic [`ListActor`](crate::ListActor) can fetch, edit, and
//! mutate it. The implementing type *is* the editable field set of a record; the
//! server-assigned identifier lives beside it in [`Resource`](crate::Resource).
//!
//! # Architecture Note
//! Writing the controller once against this trait is what keeps the category, product,
//! and offer screens from drifting apart. Associated types and constants carry everything
//! that differs between them: the identifier type, the label used in notices, and the
//! required fields.
//!
//! # Provided Methods (Hooks)
//! - [`Entity::missing_required`] and [`Entity::validate`] derive required-field checks from
//!   [`Entity::REQUIRED`] and [`Entity::field`].
//! - [`Entity::prepare_update`] runs right before an update is sent. The default does nothing.

use crate::error::FieldError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a list controller.
///
/// Field access is by *logical* field name with a textual value, matching how an input
/// form hands values over. Implementations parse numbers and dates themselves and report
/// malformed input as [`FieldError::Invalid`].
pub trait Entity:
    Clone + Debug + Default + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The opaque identifier assigned by the remote system.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + Serialize + DeserializeOwned;

    /// Singular, lowercase name used in notices (e.g. `"category"`).
    const LABEL: &'static str;

    /// Plural, lowercase name used in notices (e.g. `"categories"`).
    const PLURAL: &'static str;

    /// Logical names of fields that must be non-empty before a request is sent.
    const REQUIRED: &'static [&'static str] = &[];

    /// The name shown in lists and matched by client-side search.
    fn display_name(&self) -> &str;

    /// Current value of a field as text, `None` when unset or unknown.
    fn field(&self, name: &str) -> Option<String>;

    /// Set a field from text input.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError>;

    /// Required fields that are currently unset or blank.
    fn missing_required(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .iter()
            .copied()
            .filter(|name| {
                self.field(name)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .collect()
    }

    /// Client-side required-field check. The server stays authoritative.
    fn validate(&self) -> Result<(), FieldError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FieldError::Required(missing))
        }
    }

    /// Called with the last known server copy right before an update is sent.
    fn prepare_update(&mut self, _current: &Self) {}
}
