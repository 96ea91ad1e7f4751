//! Book Entity
//!
//! Owning side of the Author/Book relationship: the book holds the author
//! reference, and deleting a book never touches its author.

use validator::Validate;

use super::{Author, AuthorRef};

// == Book ==
/// A book record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
pub struct Book {
    /// Identity, `None` until the record is persisted
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub cover_text: String,
    /// Reader comment, only exposed from API version 2.0 on
    pub comment: Option<String>,
    /// Linked author, `None` when unset
    pub author: Option<AuthorRef>,
}

impl Book {
    /// Creates an unsaved book with no author.
    pub fn new(title: impl Into<String>, cover_text: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            cover_text: cover_text.into(),
            comment: None,
            author: None,
        }
    }

    /// Links (or unlinks) the author.
    ///
    /// An unsaved author cannot be referenced and leaves the link unset.
    pub fn set_author(&mut self, author: Option<&Author>) {
        self.author = author.and_then(Author::reference);
    }

    /// Identity of the linked author, if any.
    pub fn author_id(&self) -> Option<i64> {
        self.author.as_ref().map(|author| author.id)
    }

    /// Compact reference used when an author lists its books.
    pub fn reference(&self) -> Option<BookRef> {
        self.id.map(|id| BookRef {
            id,
            title: self.title.clone(),
            cover_text: self.cover_text.clone(),
        })
    }
}

// == Book Reference ==
/// A book as embedded in its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRef {
    pub id: i64,
    pub title: String,
    pub cover_text: String,
}
