// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors surfaced by catalog operations.
///
/// `InvalidIdentifier` and `Validation` are always raised before anything is
/// written, so callers can rely on "rejected" meaning "nothing changed".
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Invalid product ID: {0}")]
  InvalidIdentifier(String),

  #[error("Product not found: {0}")]
  NotFound(String),

  #[error("{0}")]
  Validation(String),

  #[error("Storage failure while {context}. Source: {source}")]
  Storage {
    context: String,
    #[source]
    source: AnyhowError,
  },
}

impl CatalogError {
  pub fn validation(message: impl Into<String>) -> Self {
    CatalogError::Validation(message.into())
  }

  /// Wraps a driver or filesystem error. `context` reads as "while <context>".
  pub fn storage(context: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    CatalogError::Storage {
      context: context.into(),
      source: source.into(),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, CatalogError::NotFound(_))
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, CatalogError::Validation(_))
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
