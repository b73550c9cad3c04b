// server/src/web/multipart.rs

//! Decoding of `multipart/form-data` product submissions.

use actix_multipart::{Field, Multipart};
use catalog_core::product::form::decode_list;
use catalog_core::{ImageUpload, ProductForm};
use futures_util::StreamExt;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

pub const IMAGE_FIELD: &str = "productImages";
pub const DELETED_IMAGES_FIELD: &str = "deletedImages";

/// Upper bound for any single text part.
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
  pub max_files: usize,
  pub max_file_bytes: usize,
}

impl UploadLimits {
  pub fn from_config(config: &AppConfig) -> Self {
    Self {
      max_files: config.max_upload_files,
      max_file_bytes: config.max_image_bytes,
    }
  }
}

/// Everything a create or update request carries.
#[derive(Debug, Default)]
pub struct ProductSubmission {
  pub form: ProductForm,
  pub uploads: Vec<ImageUpload>,
  pub deleted_images: Vec<String>,
}

async fn read_field(field: &mut Field, limit: usize, what: &str) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  while let Some(chunk) = field.next().await {
    let chunk = chunk.map_err(|e| AppError::Upload(format!("Failed to read {}: {}", what, e)))?;
    if buf.len() + chunk.len() > limit {
      return Err(AppError::Upload(format!(
        "{} exceeds the maximum size of {} bytes",
        what, limit
      )));
    }
    buf.extend_from_slice(&chunk);
  }
  Ok(buf)
}

/// Reads the whole multipart stream into a `ProductSubmission`.
///
/// Unknown text parts are ignored. Empty file parts are skipped and do not
/// count towards `limits.max_files`.
pub async fn read_submission(mut payload: Multipart, limits: UploadLimits) -> Result<ProductSubmission> {
  let mut submission = ProductSubmission::default();
  let mut deleted_raw: Vec<String> = Vec::new();

  while let Some(field) = payload.next().await {
    let mut field = field.map_err(|e| AppError::Upload(format!("Malformed multipart body: {}", e)))?;
    let (name, file_name) = match field.content_disposition() {
      Some(cd) => (
        cd.get_name().unwrap_or_default().to_string(),
        cd.get_filename().map(str::to_string),
      ),
      None => (String::new(), None),
    };

    if name == IMAGE_FIELD {
      let file_name = file_name.unwrap_or_default();
      let what = format!("image '{}'", file_name);
      let bytes = read_field(&mut field, limits.max_file_bytes, &what).await?;
      if bytes.is_empty() {
        debug!(file_name = %file_name, "Skipping empty file part.");
        continue;
      }
      if submission.uploads.len() >= limits.max_files {
        return Err(AppError::Upload(format!(
          "Too many images: at most {} files may be uploaded at once",
          limits.max_files
        )));
      }
      submission.uploads.push(ImageUpload { file_name, bytes });
      continue;
    }

    let what = format!("field '{}'", name);
    let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES, &what).await?;
    let value = String::from_utf8(bytes).map_err(|_| AppError::Upload(format!("{} is not valid UTF-8", what)))?;

    let form = &mut submission.form;
    match name.as_str() {
      "productName" => form.name = Some(value),
      "productPrice" => form.price = Some(value),
      "productDescription" => form.description = Some(value),
      "productQuantity" => form.quantity = Some(value),
      "productBrand" => form.brand = Some(value),
      "productColor" => form.color = Some(value),
      "productGender" => form.gender = Some(value),
      "productCategory" => form.categories.push(value),
      "productSize" => form.sizes.push(value),
      DELETED_IMAGES_FIELD => deleted_raw.push(value),
      other => debug!(field = other, "Ignoring unknown form field."),
    }
  }

  submission.deleted_images = decode_list(DELETED_IMAGES_FIELD, &deleted_raw)?;
  debug!(
    uploads = submission.uploads.len(),
    deleted_images = submission.deleted_images.len(),
    "Decoded product submission."
  );
  Ok(submission)
}
