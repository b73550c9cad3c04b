// server/src/web/cors.rs

use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::AppConfig;

/// CORS for the storefront, which is served from a different origin.
pub fn cors_middleware(config: &AppConfig) -> Cors {
  let cors = Cors::default()
    .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
    .max_age(3600);

  if config.cors_allowed_origins.is_empty() {
    return cors.allow_any_origin();
  }
  config
    .cors_allowed_origins
    .iter()
    .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
