// core/src/query/params.rs

use serde::Deserialize;

/// Raw query-string parameters for search and filter-option requests.
///
/// Every field is an optional string exactly as received; interpretation
/// (trimming, list splitting, numeric fallbacks) happens in the predicate
/// builder and the paginator so that malformed input never fails extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
  /// Matches against the product name only.
  pub query: Option<String>,
  /// Broad search across name, categories, brand, color and gender.
  #[serde(rename = "searchQuery")]
  pub search_query: Option<String>,
  /// Comma-separated categories.
  pub category: Option<String>,
  pub color: Option<String>,
  pub brand: Option<String>,
  pub gender: Option<String>,
  /// Comma-separated sizes.
  pub size: Option<String>,
  pub price_min: Option<String>,
  pub price_max: Option<String>,
  pub page: Option<String>,
  pub limit: Option<String>,
  #[serde(rename = "sortOrder")]
  pub sort_order: Option<String>,
}

/// Treats absent, empty and whitespace-only values alike.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Splits a comma-separated parameter, trimming and dropping empty elements.
pub(crate) fn split_csv(value: &Option<String>) -> Vec<String> {
  present(value)
    .map(|raw| {
      raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default()
}
