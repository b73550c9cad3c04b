// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use async_trait::async_trait;
use catalog_core::{
  CatalogError, CatalogResult, CatalogService, Gender, ImageStore, ImageUpload, InMemoryProductStore, Product,
  ProductForm, ProductStore, SearchParams,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Tracing (initialized once per test binary) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Product fixtures ---
pub struct ProductFixture {
  pub name: &'static str,
  pub price: &'static str,
  pub brand: &'static str,
  pub color: &'static str,
  pub gender: Gender,
  pub categories: &'static [&'static str],
  pub sizes: &'static [&'static str],
}

pub fn product(fixture: ProductFixture) -> Product {
  let now = Utc::now();
  Product {
    id: Uuid::new_v4(),
    name: fixture.name.to_string(),
    price: Decimal::from_str(fixture.price).unwrap(),
    description: format!("{} description", fixture.name),
    quantity: 5,
    sizes: fixture.sizes.iter().map(|s| s.to_string()).collect(),
    categories: fixture.categories.iter().map(|s| s.to_string()).collect(),
    brand: fixture.brand.to_string(),
    color: fixture.color.to_string(),
    gender: fixture.gender,
    images: vec![format!("{}.png", fixture.name.to_lowercase().replace(' ', "-"))],
    created_at: now,
    updated_at: now,
  }
}

/// A small catalog with overlapping facets.
pub fn sample_catalog() -> Vec<Product> {
  vec![
    product(ProductFixture {
      name: "Trail Runner",
      price: "89.90",
      brand: "Acme",
      color: "Red",
      gender: Gender::Women,
      categories: &["Shoes", "Running"],
      sizes: &["38", "39"],
    }),
    product(ProductFixture {
      name: "City Sneaker",
      price: "59.00",
      brand: "Acme",
      color: "White",
      gender: Gender::Unisex,
      categories: &["Shoes"],
      sizes: &["40", "41"],
    }),
    product(ProductFixture {
      name: "Rain Jacket",
      price: "120.00",
      brand: "Northwind",
      color: "Blue",
      gender: Gender::Men,
      categories: &["Jackets", "Outdoor"],
      sizes: &["M", "L"],
    }),
    product(ProductFixture {
      name: "Wool Beanie",
      price: "15.50",
      brand: "Northwind",
      color: "Red",
      gender: Gender::Unisex,
      categories: &["Accessories"],
      sizes: &["One Size"],
    }),
    product(ProductFixture {
      name: "Yoga Pants",
      price: "45.00",
      brand: "Zen",
      color: "Black",
      gender: Gender::Women,
      categories: &["Pants", "Running"],
      sizes: &["S", "M"],
    }),
  ]
}

pub async fn seeded_store(products: &[Product]) -> InMemoryProductStore {
  let store = InMemoryProductStore::new();
  for p in products {
    store.insert(p).await.unwrap();
  }
  store
}

pub fn params(pairs: &[(&str, &str)]) -> SearchParams {
  let mut p = SearchParams::default();
  for (key, value) in pairs {
    let value = Some(value.to_string());
    match *key {
      "query" => p.query = value,
      "searchQuery" => p.search_query = value,
      "category" => p.category = value,
      "color" => p.color = value,
      "brand" => p.brand = value,
      "gender" => p.gender = value,
      "size" => p.size = value,
      "price_min" => p.price_min = value,
      "price_max" => p.price_max = value,
      "page" => p.page = value,
      "limit" => p.limit = value,
      "sortOrder" => p.sort_order = value,
      other => panic!("unknown search param {}", other),
    }
  }
  p
}

pub fn names(products: &[Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

// --- Form fixtures ---
pub fn valid_form() -> ProductForm {
  ProductForm {
    name: Some("Trail Runner".into()),
    price: Some("89.90".into()),
    description: Some("Lightweight trail shoe".into()),
    quantity: Some("12".into()),
    brand: Some("Acme".into()),
    color: Some("Red".into()),
    gender: Some("women".into()),
    categories: vec!["Shoes,Running".into()],
    sizes: vec![r#"["38","39"]"#.into()],
  }
}

pub fn upload(name: &str) -> ImageUpload {
  ImageUpload {
    file_name: name.to_string(),
    bytes: name.as_bytes().to_vec(),
  }
}

// --- Image store double ---

/// Records every save/remove; saved files are named `stored-<n>-<original>`.
#[derive(Default)]
pub struct RecordingImageStore {
  pub saved: Mutex<Vec<String>>,
  pub removed: Mutex<Vec<String>>,
  pub fail_saves: bool,
}

#[async_trait]
impl ImageStore for RecordingImageStore {
  async fn save(&self, upload: &ImageUpload) -> CatalogResult<String> {
    if self.fail_saves {
      return Err(CatalogError::storage(
        "writing image",
        std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
      ));
    }
    let mut saved = self.saved.lock();
    let name = format!("stored-{}-{}", saved.len(), upload.file_name);
    saved.push(name.clone());
    Ok(name)
  }

  async fn remove(&self, file_name: &str) -> CatalogResult<()> {
    self.removed.lock().push(file_name.to_string());
    Ok(())
  }
}

pub struct Harness {
  pub service: CatalogService,
  pub store: InMemoryProductStore,
  pub images: Arc<RecordingImageStore>,
}

pub fn harness() -> Harness {
  setup_tracing();
  let store = InMemoryProductStore::new();
  let images = Arc::new(RecordingImageStore::default());
  let service = CatalogService::new(Arc::new(store.clone()), images.clone());
  Harness { service, store, images }
}
