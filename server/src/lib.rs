// server/src/lib.rs

//! HTTP surface for the product catalog: configuration, Postgres persistence
//! and the actix-web routes over `catalog_core::CatalogService`.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod state;
pub mod web;

use std::sync::Arc;

use catalog_core::{CatalogService, InMemoryProductStore, LocalImageStore, ProductStore};
use sqlx::postgres::PgPoolOptions;

use crate::config::{AppConfig, StoreBackend};
use crate::db::PgProductStore;
use crate::errors::{AppError, Result};
use crate::state::AppState;

/// Connects the configured product store and builds the shared state.
pub async fn build_state(config: AppConfig) -> Result<AppState> {
  let products: Arc<dyn ProductStore> = match config.store_backend {
    StoreBackend::Postgres => {
      let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
      let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
      tracing::info!("Successfully connected to the database.");
      if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied.");
      }
      Arc::new(PgProductStore::new(pool))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory product store; data will not survive a restart.");
      Arc::new(InMemoryProductStore::new())
    }
  };
  let images = Arc::new(LocalImageStore::new(config.upload_dir.clone()));

  Ok(AppState {
    catalog: Arc::new(CatalogService::new(products, images)),
    config: Arc::new(config),
  })
}
