//! HTTP middleware and extractors.

pub mod auth;
