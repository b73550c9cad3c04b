// core/src/product/form.rs

//! Raw create/update payload and its validation into a `ProductDraft`.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::Gender;
use crate::error::{CatalogError, CatalogResult};

/// Prices are stored as `NUMERIC(12, 2)`.
pub const PRICE_SCALE: u32 = 2;
/// Exclusive upper bound for a price, 10^10.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Fields as they arrive from a form. List fields keep every raw value so
/// repeated parts, JSON-encoded arrays and comma lists can all be decoded.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
  pub name: Option<String>,
  pub price: Option<String>,
  pub description: Option<String>,
  pub quantity: Option<String>,
  pub brand: Option<String>,
  pub color: Option<String>,
  pub gender: Option<String>,
  pub categories: Vec<String>,
  pub sizes: Vec<String>,
}

/// Validated, normalized scalar fields of a product (everything but images).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
  pub name: String,
  pub price: Decimal,
  pub description: String,
  pub quantity: u32,
  pub sizes: Vec<String>,
  pub categories: Vec<String>,
  pub brand: String,
  pub color: String,
  pub gender: Gender,
}

impl ProductForm {
  pub fn validate(&self) -> CatalogResult<ProductDraft> {
    let name = required("productName", &self.name)?;
    let description = required("productDescription", &self.description)?;
    let brand = required("productBrand", &self.brand)?;
    let color = required("productColor", &self.color)?;

    let price_raw = required("productPrice", &self.price)?;
    let price = Decimal::from_str(&price_raw)
      .map_err(|_| CatalogError::validation(format!("Invalid productPrice '{}'", price_raw)))?;
    if price < Decimal::ZERO {
      return Err(CatalogError::validation("productPrice must not be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
      return Err(CatalogError::validation(format!(
        "productPrice must have at most {} decimal places",
        PRICE_SCALE
      )));
    }
    if price >= PRICE_LIMIT {
      return Err(CatalogError::validation(format!("productPrice must be below {}", PRICE_LIMIT)));
    }

    let quantity_raw = required("productQuantity", &self.quantity)?;
    let quantity = quantity_raw
      .parse::<u32>()
      .map_err(|_| CatalogError::validation(format!("Invalid productQuantity '{}'", quantity_raw)))?;

    let gender = required("productGender", &self.gender)?.parse::<Gender>()?;

    let categories = decode_list("productCategory", &self.categories)?;
    if categories.is_empty() {
      return Err(CatalogError::validation("At least one product category is required"));
    }
    let sizes = decode_list("productSize", &self.sizes)?;
    if sizes.is_empty() {
      return Err(CatalogError::validation("At least one product size is required"));
    }

    Ok(ProductDraft {
      name,
      price,
      description,
      quantity,
      sizes,
      categories,
      brand,
      color,
      gender,
    })
  }
}

fn required(field: &str, value: &Option<String>) -> CatalogResult<String> {
  match value.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v.to_string()),
    _ => Err(CatalogError::validation(format!("All fields are required: missing {}", field))),
  }
}

/// Decodes a list field from its raw values.
///
/// Each raw value is either a JSON array of strings or a comma-separated list.
/// Elements are trimmed, empties dropped and duplicates removed keeping the
/// first occurrence.
pub fn decode_list(field: &str, raw_values: &[String]) -> CatalogResult<Vec<String>> {
  let mut out: Vec<String> = Vec::new();
  for raw in raw_values {
    let raw = raw.trim();
    let items: Vec<String> = if raw.starts_with('[') {
      serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| CatalogError::validation(format!("Invalid {} list: {}", field, e)))?
    } else {
      raw.split(',').map(str::to_string).collect()
    };
    for item in items {
      let item = item.trim();
      if !item.is_empty() && !out.iter().any(|seen| seen == item) {
        out.push(item.to_string());
      }
    }
  }
  Ok(out)
}
