// server/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use catalog_core::SearchParams;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::multipart::{read_submission, UploadLimits};

#[instrument(name = "handler::search_products", skip(app_state, query), err(Display))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
  let results = app_state.catalog.search(&query).await?;
  let page = results.page;

  Ok(HttpResponse::Ok().json(json!({
      "products": page.items,
      "totalProducts": page.total_count,
      "totalPages": page.total_pages,
      "currentPage": page.current_page,
      "hasNextPage": page.has_next,
      "hasPreviousPage": page.has_prev,
      "facets": results.facets,
  })))
}

#[instrument(name = "handler::filter_options", skip(app_state, query), err(Display))]
pub async fn filter_options_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
  let facets = app_state.catalog.filter_options(&query).await?;
  Ok(HttpResponse::Ok().json(facets))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()), err(Display))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get(&path).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip(app_state, payload), err(Display))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let submission = read_submission(payload, UploadLimits::from_config(&app_state.config)).await?;
  let product = app_state.catalog.create(&submission.form, &submission.uploads).await?;
  info!(product_id = %product.id, "Product created.");

  Ok(HttpResponse::Created().json(json!({
      "message": "Product created successfully",
      "product": product,
  })))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_str()), err(Display))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let submission = read_submission(payload, UploadLimits::from_config(&app_state.config)).await?;
  let product = app_state
    .catalog
    .update(&path, &submission.form, &submission.uploads, &submission.deleted_images)
    .await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_str()), err(Display))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog.delete(&path).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Product successfully deleted" })))
}
