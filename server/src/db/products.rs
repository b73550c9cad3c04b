// server/src/db/products.rs

use async_trait::async_trait;
use catalog_core::{
  CatalogError, CatalogResult, Constraint, Facets, ListField, Predicate, Product, ProductStore, ScalarField,
  SortOrder, TextScope,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::models::{ProductRow, PRODUCT_COLUMNS};

/// `ProductStore` over the `products` table.
///
/// Predicates are compiled to SQL with every user value bound as a parameter.
/// Sorting and facet values use the "C" collation so ordering matches the
/// in-memory store; the name sort compares lowercased names first.
#[derive(Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn list_column(field: ListField) -> &'static str {
  match field {
    ListField::Categories => "categories",
    ListField::Sizes => "sizes",
  }
}

fn scalar_column(field: ScalarField) -> &'static str {
  match field {
    ScalarField::Brand => "brand",
    ScalarField::Color => "color",
    ScalarField::Gender => "gender",
  }
}

/// Escapes LIKE metacharacters so the needle is matched literally, then wraps it in `%`.
fn like_pattern(needle: &str) -> String {
  let mut pattern = String::with_capacity(needle.len() + 2);
  pattern.push('%');
  for ch in needle.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

fn push_constraint(builder: &mut QueryBuilder<'_, Postgres>, constraint: &Constraint) {
  match constraint {
    Constraint::TextMatch { needle, scope } => {
      let pattern = like_pattern(needle);
      match scope {
        TextScope::Name => {
          builder.push("name ILIKE ").push_bind(pattern);
        }
        TextScope::Everywhere => {
          builder.push("(name ILIKE ").push_bind(pattern.clone());
          for column in ["brand", "color", "gender"] {
            builder.push(" OR ").push(column).push(" ILIKE ").push_bind(pattern.clone());
          }
          builder
            .push(" OR EXISTS (SELECT 1 FROM unnest(categories) AS c WHERE c ILIKE ")
            .push_bind(pattern)
            .push("))");
        }
      }
    }
    Constraint::SetIntersect { field, values } => {
      builder
        .push(list_column(*field))
        .push(" && ")
        .push_bind(values.clone())
        .push("::text[]");
    }
    Constraint::ExactMatch { field, value } => {
      builder
        .push("lower(")
        .push(scalar_column(*field))
        .push(") = lower(")
        .push_bind(value.clone())
        .push(")");
    }
    Constraint::PriceRange { min, max } => {
      builder.push("price >= ").push_bind(*min);
      if let Some(max) = max {
        builder.push(" AND price <= ").push_bind(*max);
      }
    }
  }
}

/// Appends ` WHERE ...` for a non-empty predicate.
pub(crate) fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
  for (i, constraint) in predicate.constraints().iter().enumerate() {
    builder.push(if i == 0 { " WHERE " } else { " AND " });
    push_constraint(builder, constraint);
  }
}

fn order_clause(sort: SortOrder) -> &'static str {
  match sort {
    SortOrder::Name => " ORDER BY lower(name) COLLATE \"C\" ASC, name COLLATE \"C\" ASC, id ASC",
    SortOrder::PriceAsc => " ORDER BY price ASC, id ASC",
    SortOrder::PriceDesc => " ORDER BY price DESC, id ASC",
  }
}

/// `SELECT value ...` returning the distinct, sorted values of one facet dimension.
pub(crate) fn facet_query<'a>(value_expr: &str, predicate: &Predicate) -> QueryBuilder<'a, Postgres> {
  let mut builder = QueryBuilder::new("SELECT value FROM (SELECT DISTINCT ");
  builder.push(value_expr).push(" AS value FROM products");
  push_predicate(&mut builder, predicate);
  builder.push(") AS facet ORDER BY value COLLATE \"C\"");
  builder
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "pg::insert", skip_all, fields(product_id = %product.id), err(Display))]
  async fn insert(&self, product: &Product) -> CatalogResult<()> {
    sqlx::query(
      "INSERT INTO products (id, name, price, description, quantity, sizes, categories, brand, color, gender, images, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(i64::from(product.quantity))
    .bind(&product.sizes)
    .bind(&product.categories)
    .bind(&product.brand)
    .bind(&product.color)
    .bind(product.gender.as_str())
    .bind(&product.images)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(&self.pool)
    .await
    .map_err(|e| CatalogError::storage("inserting product", e))?;
    Ok(())
  }

  #[instrument(name = "pg::find", skip(self), err(Display))]
  async fn find(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    let row = sqlx::query_as::<_, ProductRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| CatalogError::storage("fetching product", e))?;
    row.map(Product::try_from).transpose()
  }

  #[instrument(name = "pg::replace", skip_all, fields(product_id = %product.id), err(Display))]
  async fn replace(&self, product: &Product) -> CatalogResult<bool> {
    let result = sqlx::query(
      "UPDATE products SET name = $2, price = $3, description = $4, quantity = $5, sizes = $6, categories = $7, \
       brand = $8, color = $9, gender = $10, images = $11, updated_at = $12 WHERE id = $1",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(i64::from(product.quantity))
    .bind(&product.sizes)
    .bind(&product.categories)
    .bind(&product.brand)
    .bind(&product.color)
    .bind(product.gender.as_str())
    .bind(&product.images)
    .bind(product.updated_at)
    .execute(&self.pool)
    .await
    .map_err(|e| CatalogError::storage("updating product", e))?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "pg::remove", skip(self), err(Display))]
  async fn remove(&self, id: Uuid) -> CatalogResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| CatalogError::storage("deleting product", e))?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "pg::count", skip_all, err(Display))]
  async fn count(&self, predicate: &Predicate) -> CatalogResult<u64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_predicate(&mut builder, predicate);
    let count = builder
      .build_query_scalar::<i64>()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| CatalogError::storage("counting products", e))?;
    Ok(count.max(0) as u64)
  }

  #[instrument(name = "pg::fetch_window", skip(self, predicate), err(Display))]
  async fn fetch_window(
    &self,
    predicate: &Predicate,
    sort: SortOrder,
    offset: u64,
    limit: u64,
  ) -> CatalogResult<Vec<Product>> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(PRODUCT_COLUMNS).push(" FROM products");
    push_predicate(&mut builder, predicate);
    builder.push(order_clause(sort));
    builder
      .push(" LIMIT ")
      .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
      .push(" OFFSET ")
      .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

    let rows = builder
      .build_query_as::<ProductRow>()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| CatalogError::storage("listing products", e))?;
    debug!(rows = rows.len(), "Fetched product window.");
    rows.into_iter().map(Product::try_from).collect()
  }

  #[instrument(name = "pg::facets", skip_all, err(Display))]
  async fn facets(&self, predicate: &Predicate) -> CatalogResult<Facets> {
    let mut values: Vec<Vec<String>> = Vec::with_capacity(5);
    for expr in ["unnest(categories)", "color", "brand", "unnest(sizes)", "gender"] {
      let column = facet_query(expr, predicate)
        .build_query_scalar::<String>()
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::storage(format!("collecting {} facet", expr), e))?;
      values.push(column);
    }
    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    Ok(Facets {
      categories: next(),
      colors: next(),
      brands: next(),
      sizes: next(),
      genders: next(),
    })
  }
}
