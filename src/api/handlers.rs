//! API Handlers
//!
//! One generic handler per CRUD operation, instantiated for each
//! [`Resource`]. Every mutation runs the same pipeline: authorize, resolve
//! the path identity, decode, merge, validate, persist, invalidate the list
//! cache, respond.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{
        header::{ACCEPT, CONTENT_TYPE, LOCATION},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::resources::Resource;
use crate::auth::{require_role, Role, RoleChecker, TokenRoleChecker};
use crate::cache::{SharedCache, TagCache, BOOKS_CACHE_TAG};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{Author, Book, HealthResponse};
use crate::serializer::{self, ApiVersion, GroupView};
use crate::store::{MemoryStore, PageQuery, Pagination, Repository};
use crate::validation;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn Repository<Author>>,
    pub books: Arc<dyn Repository<Book>>,
    /// List response cache, every entry tagged `booksCache`
    pub cache: SharedCache,
    pub roles: Arc<dyn RoleChecker>,
    /// Representation served when the request does not negotiate one
    pub default_version: ApiVersion,
}

impl AppState {
    /// Creates an AppState over `store` with cache and roles from `config`.
    pub fn new(store: Arc<MemoryStore>, config: &Config) -> Self {
        let cache = TagCache::new(config.cache_max_entries, config.cache_ttl);
        Self {
            authors: store.clone(),
            books: store,
            cache: SharedCache::new(cache),
            roles: Arc::new(TokenRoleChecker::new(config.admin_token.clone())),
            default_version: config.default_api_version,
        }
    }

    /// Creates a new AppState from configuration over an empty store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// Drops every cached list page after a successful mutation.
    async fn invalidate_lists(&self) {
        self.cache.invalidate_tag(BOOKS_CACHE_TAG).await;
    }

    fn negotiate_version(&self, headers: &HeaderMap, query: Option<&str>) -> ApiVersion {
        let accept = headers.get(ACCEPT).and_then(|value| value.to_str().ok());
        ApiVersion::negotiate(accept, query, self.default_version)
    }
}

/// `?version=` override accepted by single-resource endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    #[serde(default)]
    pub version: Option<String>,
}

fn json_body(status: StatusCode, body: Bytes) -> Response {
    (status, [(CONTENT_TYPE, "application/json")], body).into_response()
}

fn decode_payload<R: Resource>(body: &[u8]) -> Result<R::Payload> {
    serializer::decode(body).map_err(|err| {
        warn!(kind = %R::KIND, error = %err, "rejected request body");
        ApiError::from(err)
    })
}

fn ensure_valid<R: Resource>(entity: &R) -> Result<()> {
    let violations = validation::validate(entity);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations))
    }
}

// == List ==
/// Handler for GET /api/{resource}s
///
/// Serves one page through the read-through cache under
/// `<kind>List-<page>-<limit>`.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let pagination = Pagination::from(&query);
    let key = pagination.cache_key(R::KIND.name());
    let repository = R::repository(&state);
    let version = state.default_version;

    let body = state
        .cache
        .get_or_compute(&key, &[BOOKS_CACHE_TAG], move || async move {
            let page = repository.find_page(pagination).await?;
            Ok::<_, ApiError>(serializer::encode_list(&page, GroupView::List, version)?)
        })
        .await?;

    Ok(json_body(StatusCode::OK, body))
}

// == Detail ==
/// Handler for GET /api/{resource}s/:id
pub async fn detail<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<VersionQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let entity = R::repository(&state).find_by_id(id).await?;
    let version = state.negotiate_version(&headers, query.version.as_deref());

    let body = serializer::encode(&entity, GroupView::Detail, version)?;
    Ok(json_body(StatusCode::OK, body))
}

// == Create ==
/// Handler for POST /api/{resource}s
///
/// Responds 201 with the stored entity and its `Location`.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<VersionQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    require_role(state.roles.as_ref(), &headers, Role::Admin)?;

    let payload = decode_payload::<R>(&body)?;
    let mut entity = R::default();
    R::apply(&state, &mut entity, payload).await?;
    ensure_valid(&entity)?;

    let saved = R::repository(&state).persist(entity).await?;
    state.invalidate_lists().await;

    let id = saved
        .id()
        .ok_or_else(|| ApiError::Internal(format!("persisted {} has no identity", R::KIND)))?;
    info!(kind = %R::KIND, id, "created");

    let version = state.negotiate_version(&headers, query.version.as_deref());
    let body = serializer::encode(&saved, GroupView::Detail, version)?;
    let location = R::KIND.detail_path(id);

    Ok((
        StatusCode::CREATED,
        [
            (LOCATION, location.as_str()),
            (CONTENT_TYPE, "application/json"),
        ],
        body,
    )
        .into_response())
}

// == Update ==
/// Handler for PUT /api/{resource}s/:id
///
/// Fields absent from the body keep their stored values.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    require_role(state.roles.as_ref(), &headers, Role::Admin)?;

    let repository = R::repository(&state);
    let mut entity = repository.find_by_id(id).await?;

    let payload = decode_payload::<R>(&body)?;
    R::apply(&state, &mut entity, payload).await?;
    ensure_valid(&entity)?;

    repository.persist(entity).await?;
    state.invalidate_lists().await;
    info!(kind = %R::KIND, id, "updated");

    Ok(StatusCode::NO_CONTENT)
}

// == Remove ==
/// Handler for DELETE /api/{resource}s/:id
///
/// Removing an author also removes its books.
pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    require_role(state.roles.as_ref(), &headers, Role::Admin)?;

    let repository = R::repository(&state);
    let entity = repository.find_by_id(id).await?;
    repository.remove(&entity).await?;
    state.invalidate_lists().await;
    info!(kind = %R::KIND, id, "removed");

    Ok(StatusCode::NO_CONTENT)
}

// == Maintenance ==
/// Handler for GET /api/books/clearCache
///
/// Drops every cached list page. Not role-gated.
pub async fn clear_cache_handler(State(state): State<AppState>) -> &'static str {
    let stats = state.cache.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "clearing list cache"
    );
    state.invalidate_lists().await;
    "Cache cleared"
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
