// server/src/models/mod.rs

//! Database row types and their conversions into domain records.

pub mod product;

pub use product::{ProductRow, PRODUCT_COLUMNS};
