// core/src/lib.rs

//! catalog_core: the query and mutation engine of a product catalog.
//!
//! - Builds storage-neutral filter predicates from raw query parameters
//!   (free text, list facets, exact-match facets, price range).
//! - Computes faceted-narrowing option lists under the active predicate.
//! - Sorts and paginates results deterministically.
//! - Reconciles a product's image list across updates (kept, added and
//!   deleted files) without ever leaving a product imageless.
//!
//! Persistence is behind the `ProductStore` and `ImageStore` traits; an
//! in-memory product store and a local-directory image store ship with the
//! crate.

pub mod error;
pub mod images;
pub mod product;
pub mod query;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult};
pub use crate::images::{reconcile, ImageReconciliation, ImageReconciler, ImageStore, ImageUpload, LocalImageStore};
pub use crate::product::{parse_product_id, Gender, Product, ProductDraft, ProductForm};
pub use crate::query::{
  Constraint, Facets, ListField, Page, PageRequest, Predicate, PredicateBuilder, ScalarField, SearchParams,
  SortOrder, TextScope,
};
pub use crate::service::{CatalogService, SearchResults};
pub use crate::store::{InMemoryProductStore, ProductStore};
