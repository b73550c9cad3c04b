// core/src/store/mod.rs

//! The persistence seam for product records.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::product::Product;
use crate::query::{Facets, Predicate, SortOrder};

pub use memory::InMemoryProductStore;

/// Storage for product records.
///
/// Implementations evaluate `Predicate`s natively. Sorted windows must break
/// ordering ties by id so paging is deterministic. There is no optimistic
/// locking: `replace` is last-writer-wins.
#[async_trait]
pub trait ProductStore: Send + Sync {
  async fn insert(&self, product: &Product) -> CatalogResult<()>;

  async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>>;

  /// Overwrites the record with `product.id`. Returns `false` if it does not exist.
  async fn replace(&self, product: &Product) -> CatalogResult<bool>;

  /// Hard delete. Returns `false` if the record did not exist.
  async fn remove(&self, id: Uuid) -> CatalogResult<bool>;

  async fn count(&self, predicate: &Predicate) -> CatalogResult<u64>;

  async fn fetch_window(
    &self,
    predicate: &Predicate,
    sort: SortOrder,
    offset: u64,
    limit: u64,
  ) -> CatalogResult<Vec<Product>>;

  /// Distinct facet values among records matching `predicate`.
  async fn facets(&self, predicate: &Predicate) -> CatalogResult<Facets>;
}
