// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use actix_web::http::header;
use actix_web::test::TestRequest;
use catalog_core::{Gender, Product};
use catalog_server::config::{AppConfig, StoreBackend};
use catalog_server::state::AppState;
use chrono::Utc;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;
use tracing::Level;
use uuid::Uuid;

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

/// In-memory state with uploads going to a private temp dir.
pub struct TestApp {
  pub state: AppState,
  pub upload_dir: TempDir,
}

pub async fn test_app_with(tweak: impl FnOnce(&mut AppConfig)) -> TestApp {
  setup_tracing();
  let upload_dir = tempfile::tempdir().unwrap();
  let mut config = AppConfig {
    store_backend: StoreBackend::Memory,
    upload_dir: upload_dir.path().to_path_buf(),
    ..AppConfig::default()
  };
  tweak(&mut config);
  let state = catalog_server::build_state(config).await.unwrap();
  TestApp { state, upload_dir }
}

pub async fn test_app() -> TestApp {
  test_app_with(|_| {}).await
}

pub fn product(name: &str, price: &str, brand: &str, gender: Gender, categories: &[&str], images: &[&str]) -> Product {
  let now = Utc::now();
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    price: Decimal::from_str(price).unwrap(),
    description: format!("{} description", name),
    quantity: 5,
    sizes: vec!["M".to_string()],
    categories: categories.iter().map(|s| s.to_string()).collect(),
    brand: brand.to_string(),
    color: "Red".to_string(),
    gender,
    images: images.iter().map(|s| s.to_string()).collect(),
    created_at: now,
    updated_at: now,
  }
}

// --- multipart/form-data bodies ---
const BOUNDARY: &str = "----catalog-test-boundary";

#[derive(Default)]
pub struct MultipartBody {
  body: Vec<u8>,
}

impl MultipartBody {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn text(mut self, name: &str, value: &str) -> Self {
    self.body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
      )
      .as_bytes(),
    );
    self
  }

  pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
    self.body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        BOUNDARY, name, file_name
      )
      .as_bytes(),
    );
    self.body.extend_from_slice(bytes);
    self.body.extend_from_slice(b"\r\n");
    self
  }

  pub fn image(self, file_name: &str) -> Self {
    self.file("productImages", file_name, b"\x89PNG fake image bytes")
  }

  /// Attaches the finished body to `req`.
  pub fn into_request(mut self, req: TestRequest) -> TestRequest {
    self.body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    req
      .insert_header((
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
      ))
      .set_payload(self.body)
  }
}

/// Every scalar field filled in, lists sent the way the browser client sends them.
pub fn valid_product_body() -> MultipartBody {
  MultipartBody::new()
    .text("productName", "Trail Runner")
    .text("productPrice", "89.90")
    .text("productDescription", "Lightweight trail shoe")
    .text("productQuantity", "12")
    .text("productBrand", "Acme")
    .text("productColor", "Red")
    .text("productGender", "women")
    .text("productCategory", "Shoes")
    .text("productCategory", "Running")
    .text("productSize", r#"["38","39"]"#)
}
