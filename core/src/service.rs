// core/src/service.rs

//! `CatalogService` composes the predicate builder, paginator, facet
//! aggregator and image reconciler over a `ProductStore` and an `ImageStore`.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::images::{ImageReconciler, ImageStore, ImageUpload};
use crate::product::{parse_product_id, Product, ProductForm};
use crate::query::{self, Facets, Page, PageRequest, Predicate, SearchParams, SortOrder};
use crate::store::ProductStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
  pub page: Page<Product>,
  pub facets: Facets,
}

#[derive(Clone)]
pub struct CatalogService {
  products: Arc<dyn ProductStore>,
  images: Arc<dyn ImageStore>,
}

impl CatalogService {
  pub fn new(products: Arc<dyn ProductStore>, images: Arc<dyn ImageStore>) -> Self {
    CatalogService { products, images }
  }

  pub fn products(&self) -> &Arc<dyn ProductStore> {
    &self.products
  }

  /// Validates the form, writes the uploads, then persists the record.
  ///
  /// Uploads written before a failed insert are left on disk.
  #[instrument(name = "catalog::create", skip_all, fields(uploads = uploads.len()), err(Display))]
  pub async fn create(&self, form: &ProductForm, uploads: &[ImageUpload]) -> CatalogResult<Product> {
    let draft = form.validate().inspect_err(|e| warn!(error = %e, "Rejected product form."))?;
    if uploads.is_empty() {
      warn!("Rejected product without images.");
      return Err(CatalogError::validation("At least one product image is required"));
    }
    ensure_supported(uploads)?;

    let images = self.save_uploads(uploads).await?;
    let product = Product::create(draft, images);
    self.products.insert(&product).await.inspect_err(|e| {
      error!(product_id = %product.id, error = %e, "Insert failed after images were written.");
    })?;

    info!(product_id = %product.id, images = product.images.len(), "Product created.");
    Ok(product)
  }

  #[instrument(name = "catalog::get", skip(self), err(Display))]
  pub async fn get(&self, raw_id: &str) -> CatalogResult<Product> {
    let id = parse_product_id(raw_id)?;
    self
      .products
      .find(id)
      .await?
      .ok_or_else(|| CatalogError::NotFound(id.to_string()))
  }

  #[instrument(name = "catalog::search", skip_all, err(Display))]
  pub async fn search(&self, params: &SearchParams) -> CatalogResult<SearchResults> {
    let predicate = Predicate::from_params(params);
    let sort = SortOrder::parse(params.sort_order.as_deref());
    let request = PageRequest::from_params(params);

    let page = query::paginate(self.products.as_ref(), &predicate, sort, request).await?;
    let facets = query::aggregate(self.products.as_ref(), &predicate).await?;
    info!(total = page.total_count, returned = page.items.len(), "Search completed.");
    Ok(SearchResults { page, facets })
  }

  #[instrument(name = "catalog::filter_options", skip_all, err(Display))]
  pub async fn filter_options(&self, params: &SearchParams) -> CatalogResult<Facets> {
    let predicate = Predicate::from_params(params);
    query::aggregate(self.products.as_ref(), &predicate).await
  }

  /// Full replace of the scalar fields and reconciliation of the image list.
  ///
  /// Rejections (bad id, invalid form, no images left) happen before any file
  /// is written. Files marked for deletion are removed only after the record
  /// is persisted; a failed removal is logged and does not fail the update.
  #[instrument(
    name = "catalog::update",
    skip(self, form, uploads, deletion_requests),
    fields(uploads = uploads.len(), deletions = deletion_requests.len()),
    err(Display)
  )]
  pub async fn update(
    &self,
    raw_id: &str,
    form: &ProductForm,
    uploads: &[ImageUpload],
    deletion_requests: &[String],
  ) -> CatalogResult<Product> {
    let id = parse_product_id(raw_id)?;
    let draft = form.validate().inspect_err(|e| warn!(error = %e, "Rejected product form."))?;
    ensure_supported(uploads)?;
    let existing = self
      .products
      .find(id)
      .await?
      .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

    let plan = ImageReconciler::new(&existing.images, deletion_requests);
    plan
      .ensure_non_empty(uploads.len())
      .inspect_err(|_| warn!("Rejected update that would leave the product without images."))?;

    let uploaded = self.save_uploads(uploads).await?;
    let reconciliation = plan.finish(uploaded)?;
    let updated = existing.replaced_with(draft, reconciliation.final_images);

    if !self.products.replace(&updated).await? {
      warn!("Product vanished before the update was persisted.");
      return Err(CatalogError::NotFound(id.to_string()));
    }

    for file_name in &reconciliation.files_to_remove {
      if let Err(e) = self.images.remove(file_name).await {
        warn!(file_name = %file_name, error = %e, "Could not remove detached image.");
      }
    }

    info!(
      images = updated.images.len(),
      removed = reconciliation.files_to_remove.len(),
      "Product updated."
    );
    Ok(updated)
  }

  /// Hard delete. Image files stay in storage.
  #[instrument(name = "catalog::delete", skip(self), err(Display))]
  pub async fn delete(&self, raw_id: &str) -> CatalogResult<()> {
    let id = parse_product_id(raw_id)?;
    if !self.products.remove(id).await? {
      return Err(CatalogError::NotFound(id.to_string()));
    }
    info!("Product deleted.");
    Ok(())
  }

  async fn save_uploads(&self, uploads: &[ImageUpload]) -> CatalogResult<Vec<String>> {
    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
      stored.push(self.images.save(upload).await?);
    }
    Ok(stored)
  }
}

fn ensure_supported(uploads: &[ImageUpload]) -> CatalogResult<()> {
  uploads
    .iter()
    .try_for_each(ImageUpload::ensure_supported)
    .inspect_err(|e| warn!(error = %e, "Rejected upload."))
}
