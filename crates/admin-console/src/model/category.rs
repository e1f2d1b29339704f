use super::wire;
use super::ResourceId;
use resource_sync::{Entity, FieldError};
use serde::{Deserialize, Serialize};

/// A product category. Only the name is editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName", default, deserialize_with = "wire::null_as_empty")]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Entity for Category {
    type Id = ResourceId;
    const LABEL: &'static str = "category";
    const PLURAL: &'static str = "categories";
    const REQUIRED: &'static [&'static str] = &["name"];

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => {
                self.name = value.to_string();
                Ok(())
            }
            other => Err(FieldError::Unknown(other.to_string())),
        }
    }
}
