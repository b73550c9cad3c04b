// server/src/web/mod.rs

pub mod cors;
pub mod handlers;
pub mod multipart;
pub mod routes;

pub use cors::cors_middleware;
pub use routes::configure_app_routes;
