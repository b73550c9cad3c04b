// server/src/db/mod.rs

//! Postgres-backed persistence.

pub mod products;

pub use products::PgProductStore;
