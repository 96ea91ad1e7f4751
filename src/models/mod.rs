//! Entity model and request/response DTOs
//!
//! Authors and books are plain records; the store owns identity assignment
//! and the relationship's inverse side.

mod author;
mod book;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use author::{Author, AuthorRef};
pub use book::{Book, BookRef};
pub use requests::{AuthorPayload, BookPayload};
pub use responses::{ErrorResponse, HealthResponse};

// == Resource Kind ==
/// The two resource kinds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Author,
    Book,
}

impl ResourceKind {
    /// Singular lowercase name, used in cache keys and messages.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Author => "author",
            ResourceKind::Book => "book",
        }
    }

    /// Collection path under which the resource is mounted.
    pub fn collection_path(self) -> &'static str {
        match self {
            ResourceKind::Author => "/api/authors",
            ResourceKind::Book => "/api/books",
        }
    }

    /// Path of a single resource's detail endpoint.
    pub fn detail_path(self, id: i64) -> String {
        format!("{}/{}", self.collection_path(), id)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
