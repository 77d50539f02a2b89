//! Media delivery HTTP endpoints.

pub mod handlers;
pub mod routes;

pub use routes::media_routes;
