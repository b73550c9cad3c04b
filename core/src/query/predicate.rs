// core/src/query/predicate.rs

//! Storage-neutral filter predicates.
//!
//! A `Predicate` is a flat list of typed constraints that are AND-combined.
//! Stores either evaluate it directly (`Predicate::matches`) or compile each
//! `Constraint` variant into their own query language.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::params::{present, split_csv, SearchParams};
use crate::product::Product;

/// Which fields a free-text needle is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScope {
  Name,
  /// Name, categories, brand, color and gender.
  Everywhere,
}

/// Single-valued text fields that support anchored, case-insensitive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
  Brand,
  Color,
  Gender,
}

/// Multi-valued fields that support "intersects" matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
  Categories,
  Sizes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
  /// Case-insensitive substring match of a literal needle.
  TextMatch { needle: String, scope: TextScope },
  /// At least one of the product's values is in `values` (exact, case-sensitive).
  SetIntersect { field: ListField, values: Vec<String> },
  /// Case-insensitive whole-value equality.
  ExactMatch { field: ScalarField, value: String },
  /// Inclusive price bounds; `max: None` is unbounded.
  PriceRange { min: Decimal, max: Option<Decimal> },
}

impl Constraint {
  pub fn matches(&self, product: &Product) -> bool {
    match self {
      Constraint::TextMatch { needle, scope } => {
        let needle = needle.to_lowercase();
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);
        match scope {
          TextScope::Name => hit(&product.name),
          TextScope::Everywhere => {
            hit(&product.name)
              || product.categories.iter().any(|c| hit(c))
              || hit(&product.brand)
              || hit(&product.color)
              || hit(product.gender.as_str())
          }
        }
      }
      Constraint::SetIntersect { field, values } => {
        let own = match field {
          ListField::Categories => &product.categories,
          ListField::Sizes => &product.sizes,
        };
        own.iter().any(|v| values.contains(v))
      }
      Constraint::ExactMatch { field, value } => {
        let own = match field {
          ScalarField::Brand => product.brand.as_str(),
          ScalarField::Color => product.color.as_str(),
          ScalarField::Gender => product.gender.as_str(),
        };
        own.to_lowercase() == value.to_lowercase()
      }
      Constraint::PriceRange { min, max } => {
        product.price >= *min && max.map_or(true, |max| product.price <= max)
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
  constraints: Vec<Constraint>,
}

impl Predicate {
  pub fn builder() -> PredicateBuilder {
    PredicateBuilder::default()
  }

  /// Builds the predicate for a search or filter-options request.
  ///
  /// Absent or empty parameters contribute nothing. The price range is always
  /// present: `price_min` defaults to zero (negative values are clamped) and
  /// `price_max` to unbounded; malformed numbers fall back to those defaults.
  pub fn from_params(params: &SearchParams) -> Self {
    Predicate::builder()
      .text(present(&params.query), TextScope::Name)
      .text(present(&params.search_query), TextScope::Everywhere)
      .any_of(ListField::Categories, split_csv(&params.category))
      .exact(ScalarField::Color, present(&params.color))
      .exact(ScalarField::Brand, present(&params.brand))
      .exact(ScalarField::Gender, present(&params.gender))
      .any_of(ListField::Sizes, split_csv(&params.size))
      .price(parse_decimal(&params.price_min), parse_decimal(&params.price_max))
      .build()
  }

  pub fn constraints(&self) -> &[Constraint] {
    &self.constraints
  }

  /// AND over every constraint; an empty predicate matches everything.
  pub fn matches(&self, product: &Product) -> bool {
    self.constraints.iter().all(|c| c.matches(product))
  }
}

/// Accumulates constraints, silently skipping inputs that carry no filter.
#[derive(Debug, Default)]
pub struct PredicateBuilder {
  constraints: Vec<Constraint>,
}

impl PredicateBuilder {
  pub fn text(mut self, needle: Option<&str>, scope: TextScope) -> Self {
    if let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) {
      self.constraints.push(Constraint::TextMatch {
        needle: needle.to_string(),
        scope,
      });
    }
    self
  }

  pub fn any_of(mut self, field: ListField, values: Vec<String>) -> Self {
    if !values.is_empty() {
      self.constraints.push(Constraint::SetIntersect { field, values });
    }
    self
  }

  pub fn exact(mut self, field: ScalarField, value: Option<&str>) -> Self {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
      self.constraints.push(Constraint::ExactMatch {
        field,
        value: value.to_string(),
      });
    }
    self
  }

  pub fn price(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
    let min = min.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
    self.constraints.push(Constraint::PriceRange { min, max });
    self
  }

  pub fn build(self) -> Predicate {
    Predicate {
      constraints: self.constraints,
    }
  }
}

fn parse_decimal(value: &Option<String>) -> Option<Decimal> {
  present(value).and_then(|raw| Decimal::from_str(raw).ok())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(pairs: &[(&str, &str)]) -> SearchParams {
    let mut p = SearchParams::default();
    for (key, value) in pairs {
      let value = Some(value.to_string());
      match *key {
        "query" => p.query = value,
        "searchQuery" => p.search_query = value,
        "category" => p.category = value,
        "color" => p.color = value,
        "brand" => p.brand = value,
        "gender" => p.gender = value,
        "size" => p.size = value,
        "price_min" => p.price_min = value,
        "price_max" => p.price_max = value,
        other => panic!("unknown param {}", other),
      }
    }
    p
  }

  #[test]
  fn empty_params_yield_only_default_price_range() {
    let predicate = Predicate::from_params(&SearchParams::default());
    assert_eq!(
      predicate.constraints(),
      &[Constraint::PriceRange {
        min: Decimal::ZERO,
        max: None
      }]
    );
  }

  #[test]
  fn empty_and_blank_strings_are_absent() {
    let predicate = Predicate::from_params(&params(&[
      ("query", ""),
      ("color", "   "),
      ("category", " , ,"),
    ]));
    assert_eq!(predicate.constraints().len(), 1);
  }

  #[test]
  fn lists_are_trimmed_and_split() {
    let predicate = Predicate::from_params(&params(&[("category", " Shoes ,, Running ")]));
    assert_eq!(
      predicate.constraints()[0],
      Constraint::SetIntersect {
        field: ListField::Categories,
        values: vec!["Shoes".into(), "Running".into()],
      }
    );
  }

  #[test]
  fn malformed_price_bounds_fall_back() {
    let predicate = Predicate::from_params(&params(&[("price_min", "abc"), ("price_max", "x1")]));
    assert_eq!(
      predicate.constraints(),
      &[Constraint::PriceRange {
        min: Decimal::ZERO,
        max: None
      }]
    );
  }

  #[test]
  fn negative_min_is_clamped_and_zero_max_is_kept() {
    let predicate = Predicate::from_params(&params(&[("price_min", "-5"), ("price_max", "0")]));
    assert_eq!(
      predicate.constraints(),
      &[Constraint::PriceRange {
        min: Decimal::ZERO,
        max: Some(Decimal::ZERO)
      }]
    );
  }

  #[test]
  fn every_supplied_filter_becomes_one_constraint() {
    let predicate = Predicate::from_params(&params(&[
      ("query", "runner"),
      ("searchQuery", "acme"),
      ("category", "Shoes"),
      ("color", "red"),
      ("brand", "Acme"),
      ("gender", "women"),
      ("size", "38,39"),
      ("price_min", "10"),
      ("price_max", "100"),
    ]));
    assert_eq!(predicate.constraints().len(), 8);
  }
}
