//! API Routes
//!
//! Configures the Axum router with every bookstore endpoint.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, create, detail, health_handler, list, remove, update, AppState,
};
use super::resources::Resource;
use crate::models::{Author, Book};

/// Mounts list, detail and mutation routes for one resource kind.
fn resource_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let collection = R::KIND.collection_path();
    router
        .route(collection, get(list::<R>).post(create::<R>))
        .route(
            &format!("{collection}/:id"),
            get(detail::<R>).put(update::<R>).delete(remove::<R>),
        )
}

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/books/clearCache", get(clear_cache_handler))
        .route("/health", get(health_handler));
    let router = resource_routes::<Book>(resource_routes::<Author>(router));

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
