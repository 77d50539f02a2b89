//! Super-admin HTTP endpoints.

pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
