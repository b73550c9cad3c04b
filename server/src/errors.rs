// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog_core::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  /// Malformed multipart bodies and upload limit violations.
  #[error("Upload Error: {0}")]
  Upload(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Catalog(CatalogError::InvalidIdentifier(_) | CatalogError::Validation(_)) => StatusCode::BAD_REQUEST,
      AppError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
      AppError::Upload(_) => StatusCode::BAD_REQUEST,
      AppError::Catalog(CatalogError::Storage { .. })
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Migration(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      AppError::Catalog(CatalogError::InvalidIdentifier(_)) => json!({"message": "Invalid product ID"}),
      AppError::Catalog(CatalogError::NotFound(_)) => json!({"message": "Product not found"}),
      AppError::Catalog(CatalogError::Validation(m)) | AppError::Upload(m) => json!({"message": m}),
      AppError::Catalog(CatalogError::Storage { .. }) => json!({"message": "Storage operation failed"}),
      AppError::Config(m) => json!({"message": "Configuration issue", "detail": m}),
      AppError::Sqlx(_) | AppError::Migration(_) => json!({"message": "Database operation failed"}),
      AppError::Internal(m) => json!({"message": "An internal error occurred", "detail": m}),
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
