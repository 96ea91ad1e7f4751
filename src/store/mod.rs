//! Store Module
//!
//! Pagination-aware repositories over the entity model.
//!
//! # Storage contract
//! - Identity is assigned by `persist` on first save.
//! - A persisted book's author must exist (foreign key).
//! - Removing an author removes every book that references it.

mod fixtures;
mod memory;
mod pagination;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Author, Book, ResourceKind};

pub use fixtures::seed_fixtures;
pub use memory::MemoryStore;
pub use pagination::{PageQuery, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};

// == Store Error ==
/// Failures reported by a repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record of this kind carries the identity
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: i64 },

    /// The entity was never persisted
    #[error("{0} has no identity")]
    Detached(ResourceKind),

    /// A book references an author that does not exist
    #[error("author {0} does not exist")]
    ForeignKey(i64),
}

/// Convenience Result type for repository calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Entity ==
/// A record the repositories know how to store.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Identity, `None` until persisted.
    fn id(&self) -> Option<i64>;
}

impl Entity for Author {
    const KIND: ResourceKind = ResourceKind::Author;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Book {
    const KIND: ResourceKind = ResourceKind::Book;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

// == Repository ==
/// Query layer over one entity kind.
///
/// Calls are independent; there is no batching across calls.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Loads one record by identity.
    async fn find_by_id(&self, id: i64) -> StoreResult<E>;

    /// Loads `pagination.limit` records starting at `pagination.offset()`,
    /// in ascending identity order.
    async fn find_page(&self, pagination: Pagination) -> StoreResult<Vec<E>>;

    /// Inserts (no identity) or overwrites (identity set) the record and
    /// returns it as stored.
    async fn persist(&self, entity: E) -> StoreResult<E>;

    /// Deletes the record, cascading per the storage contract.
    async fn remove(&self, entity: &E) -> StoreResult<()>;
}
