// server/src/models/product.rs

use catalog_core::{CatalogError, Gender, Product};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Column list shared by every `SELECT` against `products`.
pub const PRODUCT_COLUMNS: &str =
  "id, name, price, description, quantity, sizes, categories, brand, color, gender, images, created_at, updated_at";

/// A `products` row as Postgres returns it.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub description: String,
  pub quantity: i64,
  pub sizes: Vec<String>,
  pub categories: Vec<String>,
  pub brand: String,
  pub color: String,
  pub gender: String,
  pub images: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
  type Error = CatalogError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    let gender = row.gender.parse::<Gender>().map_err(|e| {
      CatalogError::storage(format!("decoding gender of product {}", row.id), e)
    })?;
    let quantity = u32::try_from(row.quantity).map_err(|e| {
      CatalogError::storage(format!("decoding quantity of product {}", row.id), e)
    })?;

    Ok(Product {
      id: row.id,
      name: row.name,
      price: row.price,
      description: row.description,
      quantity,
      sizes: row.sizes,
      categories: row.categories,
      brand: row.brand,
      color: row.color,
      gender,
      images: row.images,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}
