//! Request Payloads
//!
//! Decoded request bodies for POST/PUT. Every field is optional so the same
//! payload serves both creation and partial updates; missing required fields
//! are caught by validation, not by decoding.

use serde::Deserialize;

use super::{Author, Book};

/// Request body for `POST /api/authors` and `PUT /api/authors/:id`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl AuthorPayload {
    /// Copies every present field onto `author`.
    pub fn merge_into(self, author: &mut Author) {
        if let Some(first_name) = self.first_name {
            author.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            author.last_name = last_name;
        }
    }
}

/// Request body for `POST /api/books` and `PUT /api/books/:id`
///
/// `idAuthor` is resolved against the store by the handler, not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_text: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub id_author: Option<i64>,
}

impl BookPayload {
    /// Copies every present scalar field onto `book`.
    pub fn merge_into(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(cover_text) = &self.cover_text {
            book.cover_text = cover_text.clone();
        }
        if let Some(comment) = &self.comment {
            book.comment = Some(comment.clone());
        }
    }
}
