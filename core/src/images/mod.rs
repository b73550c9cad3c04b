// core/src/images/mod.rs

//! Product image files: upload payloads, the storage seam and the
//! reconciliation of a product's image list across updates.

pub mod local;

use async_trait::async_trait;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

pub use local::LocalImageStore;

/// A file part received with a create or update request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
  /// Name as sent by the client; only its extension is kept.
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// Raster formats accepted for upload, by lowercased extension.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

impl ImageUpload {
  /// Lowercased extension of the client's file name, if any.
  pub fn extension(&self) -> Option<String> {
    Path::new(&self.file_name)
      .extension()
      .and_then(|e| e.to_str())
      .map(str::to_ascii_lowercase)
  }

  /// Rejects files whose extension is not an image format we serve.
  pub fn ensure_supported(&self) -> CatalogResult<()> {
    match self.extension() {
      Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
      _ => Err(CatalogError::validation(format!(
        "Unsupported image '{}': expected one of {}",
        self.file_name,
        SUPPORTED_EXTENSIONS.join(", ")
      ))),
    }
  }
}

/// Where image bytes live. Records only ever hold the returned filenames.
#[async_trait]
pub trait ImageStore: Send + Sync {
  /// Persists the upload under a freshly generated unique filename.
  async fn save(&self, upload: &ImageUpload) -> CatalogResult<String>;

  /// Deletes a stored file. Removing a file that is already gone succeeds.
  async fn remove(&self, file_name: &str) -> CatalogResult<()>;
}

/// Outcome of reconciling a product's images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReconciliation {
  /// Surviving existing images in their original order, then new uploads.
  pub final_images: Vec<String>,
  /// Files to delete from storage: requested deletions that were actually
  /// attached to the product and are not referenced by `final_images`.
  pub files_to_remove: Vec<String>,
}

/// Two-phase reconciliation.
///
/// The plan is computed from the stored images and the deletion requests
/// before any upload is written, so an update that would leave the product
/// without images is rejected up front. `finish` then appends the stored
/// filenames of the new uploads.
#[derive(Debug, Clone)]
pub struct ImageReconciler {
  retained: Vec<String>,
  removed: Vec<String>,
}

impl ImageReconciler {
  pub fn new(existing: &[String], deletion_requests: &[String]) -> Self {
    let mut retained = Vec::with_capacity(existing.len());
    let mut removed: Vec<String> = Vec::new();
    for image in existing {
      if deletion_requests.contains(image) {
        if !removed.contains(image) {
          removed.push(image.clone());
        }
      } else {
        retained.push(image.clone());
      }
    }
    ImageReconciler { retained, removed }
  }

  pub fn retained(&self) -> &[String] {
    &self.retained
  }

  /// Fails when neither retained images nor `upload_count` new files remain.
  pub fn ensure_non_empty(&self, upload_count: usize) -> CatalogResult<()> {
    if self.retained.is_empty() && upload_count == 0 {
      return Err(CatalogError::validation("At least one product image is required"));
    }
    Ok(())
  }

  pub fn finish(self, uploaded: Vec<String>) -> CatalogResult<ImageReconciliation> {
    self.ensure_non_empty(uploaded.len())?;
    let mut final_images = self.retained;
    final_images.extend(uploaded);
    let files_to_remove = self
      .removed
      .into_iter()
      .filter(|f| !final_images.contains(f))
      .collect();
    Ok(ImageReconciliation {
      final_images,
      files_to_remove,
    })
  }
}

/// `(existing \ deletion_requests) ++ uploaded`, plus the files to remove.
///
/// Deletion requests naming images the product does not have are ignored.
/// An empty final list is a validation error.
pub fn reconcile(
  existing: &[String],
  uploaded: &[String],
  deletion_requests: &[String],
) -> CatalogResult<ImageReconciliation> {
  ImageReconciler::new(existing, deletion_requests).finish(uploaded.to_vec())
}
