// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  /// Process-local store; data is lost on restart.
  Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  /// Required for the Postgres backend only.
  pub database_url: Option<String>,
  pub run_migrations: bool,

  // Image uploads
  pub upload_dir: PathBuf,
  pub max_upload_files: usize,
  pub max_image_bytes: usize,

  /// Origins allowed by CORS; empty allows any origin.
  pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 5000,
      store_backend: StoreBackend::Postgres,
      database_url: None,
      run_migrations: true,
      upload_dir: PathBuf::from("uploads"),
      max_upload_files: 10,
      max_image_bytes: 5 * 1024 * 1024,
      cors_allowed_origins: Vec::new(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let defaults = Self::default();
    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_env("SERVER_PORT", get_env("SERVER_PORT"), defaults.server_port)?;

    let store_backend = match get_env("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase).as_deref() {
      None | Some("postgres") => StoreBackend::Postgres,
      Some("memory") => StoreBackend::Memory,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };
    let database_url = get_env("DATABASE_URL");
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required by the postgres backend)".to_string(),
      ));
    }
    let run_migrations = parse_env("RUN_MIGRATIONS", get_env("RUN_MIGRATIONS"), defaults.run_migrations)?;

    let upload_dir = get_env("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir);
    let max_upload_files = parse_env("MAX_UPLOAD_FILES", get_env("MAX_UPLOAD_FILES"), defaults.max_upload_files)?;
    let max_image_bytes = parse_env("MAX_IMAGE_BYTES", get_env("MAX_IMAGE_BYTES"), defaults.max_image_bytes)?;

    let cors_allowed_origins = parse_origins(get_env("CORS_ALLOWED_ORIGINS").as_deref())?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      run_migrations,
      upload_dir,
      max_upload_files,
      max_image_bytes,
      cors_allowed_origins,
    })
  }
}

fn parse_env<T>(var_name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    None => Ok(default),
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
  }
}

/// Comma-separated origins; `*` (alone or in the list) means any origin.
fn parse_origins(raw: Option<&str>) -> Result<Vec<String>> {
  let origins: Vec<String> = raw
    .unwrap_or_default()
    .split(',')
    .map(|o| o.trim().trim_end_matches('/').to_string())
    .filter(|o| !o.is_empty())
    .collect();
  if origins.iter().any(|o| o == "*") {
    return Ok(Vec::new());
  }
  if let Some(bad) = origins
    .iter()
    .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
  {
    return Err(AppError::Config(format!(
      "Invalid CORS_ALLOWED_ORIGINS entry '{}': expected an http(s) origin",
      bad
    )));
  }
  Ok(origins)
}
