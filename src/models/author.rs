//! Author Entity
//!
//! Inverse side of the Author/Book relationship.

use validator::Validate;

use super::BookRef;

// == Author ==
/// An author record.
///
/// `books` is derived from the owning side (`Book::author`) whenever the
/// record is loaded from the store; it is never written back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
pub struct Author {
    /// Identity, `None` until the record is persisted
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    /// Books written by this author, in store order
    pub books: Vec<BookRef>,
}

impl Author {
    /// Creates an unsaved author with no books.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            books: Vec::new(),
        }
    }

    /// Compact reference used when a book embeds its author.
    ///
    /// Returns `None` for an unsaved author.
    pub fn reference(&self) -> Option<AuthorRef> {
        self.id.map(|id| AuthorRef {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        })
    }
}

// == Author Reference ==
/// An author as embedded in a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}
