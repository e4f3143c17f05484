use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const HYPHENATED_LEN: usize = 36;

/// Opaque product identifier.
///
/// Always assigned by a store; clients only ever hand back the string form they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ProductId(Uuid);

impl ProductId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub(crate) fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parses the hyphenated form handed out in responses. Anything else, including the
    /// simple, braced and urn spellings of the same UUID, yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::try_parse(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The user-editable part of a product, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn new(id: ProductId, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            stock: fields.stock,
            image: fields.image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            stock: self.stock,
            image: self.image.clone(),
        }
    }

    /// Replaces the editable fields, keeping `id` and `created_at`.
    pub(crate) fn apply(&mut self, fields: ProductFields, updated_at: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.stock = fields.stock;
        self.image = fields.image;
        self.updated_at = updated_at;
    }
}
