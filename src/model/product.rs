//! The catalog's product record.
//!
//! [`Product`] implements the [`ResourceEntity`](crate::framework::ResourceEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ResourceEntity for Product`](crate::product_actor::entity) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

use crate::product_actor::ProductError;

/// Message returned when a create request lacks a required field.
pub const MISSING_FIELDS: &str = "All fields are required";

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Largest magnitude below which every whole `f64` is an exact integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole prices as JSON integers (`120`, not `120.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl Product {
    /// Creates a new Product instance stamped with the current time.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the store)
    /// * `name` - Product name
    /// * `price` - Product price
    /// * `image` - URL of the product image
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_params(id: ProductId, params: ProductCreate) -> Self {
        Self::new(id, params.name, params.price, params.image)
    }

    /// Checks the required-field rules shared by create and update.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::Validation("name is required".into()));
        }
        if !self.price.is_finite() {
            return Err(ProductError::Validation("price must be a number".into()));
        }
        if self.image.trim().is_empty() {
            return Err(ProductError::Validation("image is required".into()));
        }
        Ok(())
    }

    /// Overwrites the fields present in `update`, then re-validates the result.
    ///
    /// On error `self` may be partially modified; callers apply updates to a copy.
    pub fn apply(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        self.validate()?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Validated payload for product creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub image: String,
}

/// Create request body as it arrives over HTTP, before required-field checks.
///
/// A blank name or image and a zero price all count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl TryFrom<ProductDraft> for ProductCreate {
    type Error = ProductError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let missing = || ProductError::Validation(MISSING_FIELDS.into());
        let name = draft.name.filter(|n| !n.trim().is_empty()).ok_or_else(missing)?;
        let price = draft.price.filter(|p| *p != 0.0).ok_or_else(missing)?;
        let image = draft.image.filter(|i| !i.trim().is_empty()).ok_or_else(missing)?;
        Ok(Self { name, price, image })
    }
}

/// Partial update: only the fields present are replaced. `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> Product {
        Product::new(ProductId::new(), "Desk", 120.0, "http://x/d.png")
    }

    #[test]
    fn draft_with_all_fields_converts() {
        let draft = ProductDraft {
            name: Some("Desk".into()),
            price: Some(120.0),
            image: Some("http://x/d.png".into()),
        };
        let create = ProductCreate::try_from(draft).unwrap();
        assert_eq!(create.name, "Desk");
        assert_eq!(create.price, 120.0);
    }

    #[test]
    fn draft_missing_or_blank_fields_is_rejected() {
        let no_price = ProductDraft {
            name: Some("Desk".into()),
            price: None,
            image: Some("http://x/d.png".into()),
        };
        assert_eq!(
            ProductCreate::try_from(no_price),
            Err(ProductError::Validation(MISSING_FIELDS.into()))
        );

        let blank_name = ProductDraft {
            name: Some("   ".into()),
            price: Some(1.0),
            image: Some("http://x/d.png".into()),
        };
        assert!(ProductCreate::try_from(blank_name).is_err());
        assert!(ProductCreate::try_from(ProductDraft::default()).is_err());
    }

    #[test]
    fn zero_price_counts_as_missing() {
        let draft = ProductDraft {
            name: Some("Sample".into()),
            price: Some(0.0),
            image: Some("http://x/s.png".into()),
        };
        assert_eq!(
            ProductCreate::try_from(draft),
            Err(ProductError::Validation(MISSING_FIELDS.into()))
        );
    }

    #[test]
    fn apply_replaces_only_provided_fields() {
        let mut product = desk();
        let before = product.clone();

        product
            .apply(ProductUpdate {
                price: Some(99.5),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(product.price, 99.5);
        assert_eq!(product.name, before.name);
        assert_eq!(product.image, before.image);
        assert_eq!(product.id, before.id);
        assert_eq!(product.created_at, before.created_at);
        assert!(product.updated_at >= before.updated_at);
    }

    #[test]
    fn apply_rejects_emptied_required_field() {
        let mut product = desk();
        let result = product.apply(ProductUpdate {
            image: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(result, Err(ProductError::Validation("image is required".into())));
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let json = serde_json::to_value(desk()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["name"], "Desk");
        assert!(json["id"].is_string());
    }

    #[test]
    fn whole_prices_serialize_as_integers() {
        let text = serde_json::to_string(&desk()).unwrap();
        assert!(text.contains("\"price\":120,"), "{text}");

        let mut lamp = desk();
        lamp.price = 99.5;
        let text = serde_json::to_string(&lamp).unwrap();
        assert!(text.contains("\"price\":99.5,"), "{text}");

        let parsed: Product = serde_json::from_str(&serde_json::to_string(&desk()).unwrap()).unwrap();
        assert_eq!(parsed.price, 120.0);
    }

    #[test]
    fn product_id_round_trips_through_display() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-an-id".parse::<ProductId>().is_err());
    }
}
