// server/src/state.rs

use crate::config::AppConfig;
use catalog_core::CatalogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<CatalogService>,
  pub config: Arc<AppConfig>, // Share loaded config
}
