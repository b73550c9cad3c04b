// core/src/query/page.rs

use serde::Serialize;
use tracing::{debug, instrument};

use super::params::{present, SearchParams};
use super::predicate::Predicate;
use crate::error::CatalogResult;
use crate::product::Product;
use crate::store::ProductStore;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  /// By name ascending, ignoring case.
  #[default]
  Name,
  PriceAsc,
  PriceDesc,
}

impl SortOrder {
  /// `"asc"` and `"desc"` sort by price; anything else is the default.
  pub fn parse(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      Some("asc") => SortOrder::PriceAsc,
      Some("desc") => SortOrder::PriceDesc,
      _ => SortOrder::Name,
    }
  }
}

/// A 1-based page window. Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: u64,
  limit: u64,
}

impl PageRequest {
  pub fn new(page: u64, limit: u64) -> Self {
    PageRequest {
      page: page.max(1),
      limit: limit.max(1),
    }
  }

  /// Non-numeric or non-positive input silently becomes 1; a missing or
  /// malformed limit uses `DEFAULT_PAGE_LIMIT`.
  pub fn from_params(params: &SearchParams) -> Self {
    let page = parse_count(&params.page).unwrap_or(1);
    let limit = parse_count(&params.limit).unwrap_or(DEFAULT_PAGE_LIMIT as i64);
    PageRequest::new(page.max(1) as u64, limit.max(1) as u64)
  }

  pub fn page(&self) -> u64 {
    self.page
  }

  pub fn limit(&self) -> u64 {
    self.limit
  }

  pub fn offset(&self) -> u64 {
    (self.page - 1).saturating_mul(self.limit)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    PageRequest::new(1, DEFAULT_PAGE_LIMIT)
  }
}

fn parse_count(value: &Option<String>) -> Option<i64> {
  present(value).and_then(|raw| raw.parse::<i64>().ok())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total_count: u64,
  pub total_pages: u64,
  pub current_page: u64,
  pub has_next: bool,
  pub has_prev: bool,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
    let total_pages = total_count.div_ceil(request.limit()).max(1);
    Page {
      items,
      total_count,
      total_pages,
      current_page: request.page(),
      has_next: request.page() < total_pages,
      has_prev: request.page() > 1,
    }
  }
}

#[instrument(
  name = "page::paginate",
  skip_all,
  fields(page = request.page(), limit = request.limit(), sort = ?sort),
  err(Display)
)]
pub async fn paginate<T>(
  store: &T,
  predicate: &Predicate,
  sort: SortOrder,
  request: PageRequest,
) -> CatalogResult<Page<Product>>
where
  T: ProductStore + ?Sized,
{
  let total = store.count(predicate).await?;
  let items = if request.offset() >= total {
    Vec::new()
  } else {
    store
      .fetch_window(predicate, sort, request.offset(), request.limit())
      .await?
  };
  debug!(total, returned = items.len(), "Page fetched.");
  Ok(Page::new(items, total, request))
}
