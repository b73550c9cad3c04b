// core/src/images/local.rs

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{ImageStore, ImageUpload};
use crate::error::{CatalogError, CatalogResult};

/// Stores images as files in a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
  root: PathBuf,
}

impl LocalImageStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    LocalImageStore { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, file_name: &str) -> CatalogResult<PathBuf> {
    let safe = !file_name.is_empty()
      && !file_name.contains('/')
      && !file_name.contains('\\')
      && file_name != "."
      && file_name != "..";
    if !safe {
      return Err(CatalogError::validation(format!("Invalid image name '{}'", file_name)));
    }
    Ok(self.root.join(file_name))
  }
}

/// `<unix-millis>-<random hex><.ext>`; the extension comes from the client's
/// file name, lowercased and restricted to ASCII alphanumerics.
pub fn generate_file_name(original: &str) -> String {
  let ext: String = Path::new(original)
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| e.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_ascii_lowercase())
    .unwrap_or_default();
  let unique = Uuid::new_v4().simple().to_string();
  let stem = format!("{}-{}", Utc::now().timestamp_millis(), &unique[..12]);
  if ext.is_empty() {
    stem
  } else {
    format!("{}.{}", stem, ext)
  }
}

#[async_trait]
impl ImageStore for LocalImageStore {
  #[instrument(name = "LocalImageStore::save", skip(self, upload), fields(original = %upload.file_name, bytes = upload.bytes.len()), err(Display))]
  async fn save(&self, upload: &ImageUpload) -> CatalogResult<String> {
    upload.ensure_supported()?;
    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|e| CatalogError::storage(format!("creating upload directory {}", self.root.display()), e))?;

    let file_name = generate_file_name(&upload.file_name);
    let path = self.root.join(&file_name);
    tokio::fs::write(&path, &upload.bytes)
      .await
      .map_err(|e| CatalogError::storage(format!("writing image {}", path.display()), e))?;

    info!(file_name = %file_name, "Image stored.");
    Ok(file_name)
  }

  #[instrument(name = "LocalImageStore::remove", skip(self), err(Display))]
  async fn remove(&self, file_name: &str) -> CatalogResult<()> {
    let path = self.path_for(file_name)?;
    match tokio::fs::remove_file(&path).await {
      Ok(()) => {
        info!("Image removed.");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!("Image already absent.");
        Ok(())
      }
      Err(e) => Err(CatalogError::storage(format!("removing image {}", path.display()), e)),
    }
  }
}
