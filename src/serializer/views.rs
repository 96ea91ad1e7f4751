//! Per-view projections of the entities.
//!
//! Each projection whitelists the fields a group view exposes; anything not
//! listed here never reaches the wire.

use serde::Serialize;

use super::{ApiVersion, GroupView, Project};
use crate::models::{Author, AuthorRef, Book, BookRef};

/// Author as embedded in a book
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<&AuthorRef> for AuthorSummary {
    fn from(author: &AuthorRef) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
        }
    }
}

/// Book as embedded in an author; `coverText` only in the detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_text: Option<String>,
}

impl BookSummary {
    fn project(book: &BookRef, view: GroupView) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            cover_text: match view {
                GroupView::List => None,
                GroupView::Detail => Some(book.cover_text.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub books: Vec<BookSummary>,
}

impl Project for Author {
    type View = AuthorView;

    fn project(&self, view: GroupView, _version: ApiVersion) -> AuthorView {
        AuthorView {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            books: self
                .books
                .iter()
                .map(|book| BookSummary::project(book, view))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub cover_text: String,
    /// Detail view, version 2.0 and later
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub author: Option<AuthorSummary>,
}

impl Project for Book {
    type View = BookView;

    fn project(&self, view: GroupView, version: ApiVersion) -> BookView {
        let comment = match (view, version) {
            (GroupView::Detail, ApiVersion::V2) => self.comment.clone(),
            _ => None,
        };

        BookView {
            id: self.id,
            title: self.title.clone(),
            cover_text: self.cover_text.clone(),
            comment,
            author: self.author.as_ref().map(AuthorSummary::from),
        }
    }
}
