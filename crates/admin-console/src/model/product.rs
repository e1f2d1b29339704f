use super::{parse_number, wire, ResourceId};
use resource_sync::{Entity, FieldError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An image file picked in the create form, sent as the `productImage` multipart part.
#[derive(Clone, Default, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A catalog product.
///
/// `category` and `offer` hold names, not ids; the API stores whatever the form sent.
/// `image` is the stored image URL. A freshly picked file lives in `upload` until the
/// create request carries it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productName", default, deserialize_with = "wire::null_as_empty")]
    pub name: String,
    #[serde(
        rename = "productPrice",
        default,
        deserialize_with = "wire::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(
        rename = "productQty",
        default,
        deserialize_with = "wire::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub category: String,
    #[serde(rename = "productOffer", default, deserialize_with = "wire::null_as_empty")]
    pub offer: String,
    #[serde(default, deserialize_with = "wire::null_as_empty")]
    pub description: String,
    #[serde(rename = "productImage", default, deserialize_with = "wire::null_as_empty")]
    pub image: String,
    #[serde(skip)]
    pub upload: Option<ImageUpload>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn with_upload(mut self, upload: ImageUpload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Text fields of a create request, wire name first. Empty values are left out.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("productName", Some(self.name.clone())),
            ("productPrice", self.price.map(|p| p.to_string())),
            ("productQty", self.quantity.map(|q| q.to_string())),
            ("category", Some(self.category.clone())),
            ("productOffer", Some(self.offer.clone())),
            ("description", Some(self.description.clone())),
        ];
        fields
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
            .collect()
    }
}

impl Entity for Product {
    type Id = ResourceId;
    const LABEL: &'static str = "product";
    const PLURAL: &'static str = "products";
    const REQUIRED: &'static [&'static str] = &["name", "price", "quantity"];

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "price" => self.price.map(|p| p.to_string()),
            "quantity" => self.quantity.map(|q| q.to_string()),
            "category" => Some(self.category.clone()),
            "offer" => Some(self.offer.clone()),
            "description" => Some(self.description.clone()),
            "image" => Some(self.image.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.to_string(),
            "price" => self.price = parse_number("price", value)?,
            "quantity" => self.quantity = parse_number("quantity", value)?,
            "category" => self.category = value.to_string(),
            "offer" => self.offer = value.to_string(),
            "description" => self.description = value.to_string(),
            "image" => self.image = value.to_string(),
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }

    /// An edit that left the image blank keeps the stored one.
    fn prepare_update(&mut self, current: &Self) {
        if self.image.is_empty() {
            self.image = current.image.clone();
        }
    }
}
