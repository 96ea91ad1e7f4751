//! API Module
//!
//! HTTP handlers and routing for the bookstore REST API.
//!
//! # Endpoints
//! - `GET /api/authors`, `GET /api/books` - Paginated lists (`?page=&limit=`)
//! - `GET /api/{resource}s/:id` - Single resource
//! - `POST /api/{resource}s` - Create (admin)
//! - `PUT /api/{resource}s/:id` - Partial update (admin)
//! - `DELETE /api/{resource}s/:id` - Delete (admin)
//! - `GET /api/books/clearCache` - Drop cached list pages
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod resources;
pub mod routes;

pub use handlers::*;
pub use resources::Resource;
pub use routes::create_router;
