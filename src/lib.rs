//! Bookstore API - Authors and books over REST
//!
//! Role-gated CRUD with paginated, tag-cached list endpoints and
//! versioned group-view serialization.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod serializer;
pub mod store;
pub mod validation;

pub use api::{create_router, AppState};
pub use config::Config;
