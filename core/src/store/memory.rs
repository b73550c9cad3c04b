// core/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::ProductStore;
use crate::error::CatalogResult;
use crate::product::Product;
use crate::query::{Facets, Predicate, SortOrder};

/// A process-local product store.
///
/// Lock guards are never held across `.await` points; every method does its
/// work synchronously under the lock and returns owned data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
  records: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.read().is_empty()
  }
}

fn compare(sort: SortOrder, a: &Product, b: &Product) -> Ordering {
  let primary = match sort {
    SortOrder::Name => a
      .name
      .to_lowercase()
      .cmp(&b.name.to_lowercase())
      .then_with(|| a.name.cmp(&b.name)),
    SortOrder::PriceAsc => a.price.cmp(&b.price),
    SortOrder::PriceDesc => b.price.cmp(&a.price),
  };
  primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
  async fn insert(&self, product: &Product) -> CatalogResult<()> {
    self.records.write().insert(product.id, product.clone());
    Ok(())
  }

  async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    Ok(self.records.read().get(&id).cloned())
  }

  async fn replace(&self, product: &Product) -> CatalogResult<bool> {
    let mut guard = self.records.write();
    match guard.get_mut(&product.id) {
      Some(slot) => {
        *slot = product.clone();
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn remove(&self, id: Uuid) -> CatalogResult<bool> {
    Ok(self.records.write().remove(&id).is_some())
  }

  async fn count(&self, predicate: &Predicate) -> CatalogResult<u64> {
    let guard = self.records.read();
    Ok(guard.values().filter(|p| predicate.matches(p)).count() as u64)
  }

  async fn fetch_window(
    &self,
    predicate: &Predicate,
    sort: SortOrder,
    offset: u64,
    limit: u64,
  ) -> CatalogResult<Vec<Product>> {
    let guard = self.records.read();
    let mut matching: Vec<&Product> = guard.values().filter(|p| predicate.matches(p)).collect();
    matching.sort_by(|a, b| compare(sort, a, b));
    Ok(
      matching
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .cloned()
        .collect(),
    )
  }

  async fn facets(&self, predicate: &Predicate) -> CatalogResult<Facets> {
    let guard = self.records.read();
    Ok(Facets::collect(guard.values().filter(|p| predicate.matches(p))))
  }
}
