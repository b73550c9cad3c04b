// core/src/query/mod.rs

//! Read side of the catalog: predicate building, faceting and paging.

pub mod facets;
pub mod page;
pub mod params;
pub mod predicate;

pub use facets::{aggregate, Facets};
pub use page::{paginate, Page, PageRequest, SortOrder, DEFAULT_PAGE_LIMIT};
pub use params::SearchParams;
pub use predicate::{Constraint, ListField, Predicate, PredicateBuilder, ScalarField, TextScope};
