// core/src/query/facets.rs

//! Per-facet "available option" sets.
//!
//! Facets are computed post-filter: only values carried by products that
//! match the full predicate are reported, so choosing a brand narrows the
//! categories offered and vice versa.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use super::predicate::Predicate;
use crate::error::CatalogResult;
use crate::product::Product;
use crate::store::ProductStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
  pub categories: Vec<String>,
  pub colors: Vec<String>,
  pub brands: Vec<String>,
  pub sizes: Vec<String>,
  pub genders: Vec<String>,
}

impl Facets {
  /// Distinct values per dimension over `products`, each list sorted.
  pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
    let mut categories = BTreeSet::new();
    let mut colors = BTreeSet::new();
    let mut brands = BTreeSet::new();
    let mut sizes = BTreeSet::new();
    let mut genders = BTreeSet::new();

    for product in products {
      categories.extend(product.categories.iter().cloned());
      sizes.extend(product.sizes.iter().cloned());
      colors.insert(product.color.clone());
      brands.insert(product.brand.clone());
      genders.insert(product.gender.as_str().to_string());
    }

    Facets {
      categories: categories.into_iter().collect(),
      colors: colors.into_iter().collect(),
      brands: brands.into_iter().collect(),
      sizes: sizes.into_iter().collect(),
      genders: genders.into_iter().collect(),
    }
  }
}

#[instrument(name = "facets::aggregate", skip_all, fields(constraints = predicate.constraints().len()), err(Display))]
pub async fn aggregate(store: &dyn ProductStore, predicate: &Predicate) -> CatalogResult<Facets> {
  let facets = store.facets(predicate).await?;
  debug!(
    categories = facets.categories.len(),
    colors = facets.colors.len(),
    brands = facets.brands.len(),
    sizes = facets.sizes.len(),
    genders = facets.genders.len(),
    "Facet options computed."
  );
  Ok(facets)
}
