// core/src/product/mod.rs

//! The product record and its field-level normalization rules.

pub mod form;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

pub use form::{ProductDraft, ProductForm};

/// Parses a raw path segment into a product id.
///
/// A string that is not a UUID is an `InvalidIdentifier`, which callers report
/// differently from a well-formed id with no record behind it.
pub fn parse_product_id(raw: &str) -> CatalogResult<Uuid> {
  Uuid::parse_str(raw.trim()).map_err(|_| CatalogError::InvalidIdentifier(raw.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
  Men,
  Women,
  Unisex,
}

impl Gender {
  pub const ALL: [Gender; 3] = [Gender::Men, Gender::Women, Gender::Unisex];

  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Men => "Men",
      Gender::Women => "Women",
      Gender::Unisex => "Unisex",
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Gender {
  type Err = CatalogError;

  /// Accepts any casing: the value is normalized to a leading capital
  /// followed by lowercase before matching.
  fn from_str(raw: &str) -> Result<Self, Self::Err> {
    let normalized = capitalize(raw.trim());
    Gender::ALL
      .into_iter()
      .find(|g| g.as_str() == normalized)
      .ok_or_else(|| CatalogError::validation("Invalid gender value"))
  }
}

fn capitalize(value: &str) -> String {
  let mut chars = value.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub description: String,
  pub quantity: u32,
  pub sizes: Vec<String>,
  pub categories: Vec<String>,
  pub brand: String,
  pub color: String,
  pub gender: Gender,
  /// Stored filenames in display order.
  pub images: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// Builds a fresh record with a new id from validated fields.
  pub fn create(draft: ProductDraft, images: Vec<String>) -> Self {
    let now = Utc::now();
    Product {
      id: Uuid::new_v4(),
      name: draft.name,
      price: draft.price,
      description: draft.description,
      quantity: draft.quantity,
      sizes: draft.sizes,
      categories: draft.categories,
      brand: draft.brand,
      color: draft.color,
      gender: draft.gender,
      images,
      created_at: now,
      updated_at: now,
    }
  }

  /// Full replace of every scalar field; only `id` and `created_at` survive.
  pub fn replaced_with(&self, draft: ProductDraft, images: Vec<String>) -> Self {
    Product {
      id: self.id,
      created_at: self.created_at,
      updated_at: Utc::now(),
      ..Product::create(draft, images)
    }
  }
}
