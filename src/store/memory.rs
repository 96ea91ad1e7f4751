//! In-memory relational store
//!
//! Two tables keyed by identity, with the book table holding the author
//! foreign key. Entities are hydrated on the way out: a book carries its
//! author reference, an author carries the books pointing at it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Entity, Pagination, Repository, StoreError, StoreResult};
use crate::models::{Author, AuthorRef, Book, BookRef};

#[derive(Debug, Clone)]
struct AuthorRow {
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone)]
struct BookRow {
    title: String,
    cover_text: String,
    comment: Option<String>,
    author_id: Option<i64>,
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<i64, AuthorRow>,
    books: BTreeMap<i64, BookRow>,
    last_author_id: i64,
    last_book_id: i64,
}

impl Tables {
    fn hydrate_author(&self, id: i64, row: &AuthorRow) -> Author {
        let books = self
            .books
            .iter()
            .filter(|(_, book)| book.author_id == Some(id))
            .map(|(&book_id, book)| BookRef {
                id: book_id,
                title: book.title.clone(),
                cover_text: book.cover_text.clone(),
            })
            .collect();

        Author {
            id: Some(id),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            books,
        }
    }

    fn hydrate_book(&self, id: i64, row: &BookRow) -> Book {
        let author = row.author_id.and_then(|author_id| {
            self.authors.get(&author_id).map(|author| AuthorRef {
                id: author_id,
                first_name: author.first_name.clone(),
                last_name: author.last_name.clone(),
            })
        });

        Book {
            id: Some(id),
            title: row.title.clone(),
            cover_text: row.cover_text.clone(),
            comment: row.comment.clone(),
            author,
        }
    }
}

// == Memory Store ==
/// Shared in-memory store implementing both repositories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of (authors, books) currently stored.
    pub async fn counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.authors.len(), tables.books.len())
    }
}

#[async_trait]
impl Repository<Author> for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Author> {
        let tables = self.tables.read().await;
        tables
            .authors
            .get(&id)
            .map(|row| tables.hydrate_author(id, row))
            .ok_or(StoreError::NotFound {
                kind: Author::KIND,
                id,
            })
    }

    async fn find_page(&self, pagination: Pagination) -> StoreResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .iter()
            .skip(pagination.offset())
            .take(pagination.limit as usize)
            .map(|(&id, row)| tables.hydrate_author(id, row))
            .collect())
    }

    async fn persist(&self, author: Author) -> StoreResult<Author> {
        let mut tables = self.tables.write().await;
        let row = AuthorRow {
            first_name: author.first_name,
            last_name: author.last_name,
        };

        let id = match author.id {
            Some(id) => {
                let slot = tables.authors.get_mut(&id).ok_or(StoreError::NotFound {
                    kind: Author::KIND,
                    id,
                })?;
                *slot = row.clone();
                id
            }
            None => {
                tables.last_author_id += 1;
                let id = tables.last_author_id;
                tables.authors.insert(id, row.clone());
                id
            }
        };

        debug!(author_id = id, "author persisted");
        Ok(tables.hydrate_author(id, &row))
    }

    async fn remove(&self, author: &Author) -> StoreResult<()> {
        let id = author.id.ok_or(StoreError::Detached(Author::KIND))?;
        let mut tables = self.tables.write().await;

        if !tables.authors.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: Author::KIND,
                id,
            });
        }

        // Cascade: children first, then the parent
        let before = tables.books.len();
        tables.books.retain(|_, book| book.author_id != Some(id));
        let cascaded = before - tables.books.len();
        tables.authors.remove(&id);

        debug!(author_id = id, cascaded, "author removed");
        Ok(())
    }
}

#[async_trait]
impl Repository<Book> for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Book> {
        let tables = self.tables.read().await;
        tables
            .books
            .get(&id)
            .map(|row| tables.hydrate_book(id, row))
            .ok_or(StoreError::NotFound {
                kind: Book::KIND,
                id,
            })
    }

    async fn find_page(&self, pagination: Pagination) -> StoreResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .skip(pagination.offset())
            .take(pagination.limit as usize)
            .map(|(&id, row)| tables.hydrate_book(id, row))
            .collect())
    }

    async fn persist(&self, book: Book) -> StoreResult<Book> {
        let author_id = book.author_id();
        let mut tables = self.tables.write().await;

        if let Some(author_id) = author_id {
            if !tables.authors.contains_key(&author_id) {
                return Err(StoreError::ForeignKey(author_id));
            }
        }

        let row = BookRow {
            title: book.title,
            cover_text: book.cover_text,
            comment: book.comment,
            author_id,
        };

        let id = match book.id {
            Some(id) => {
                let slot = tables.books.get_mut(&id).ok_or(StoreError::NotFound {
                    kind: Book::KIND,
                    id,
                })?;
                *slot = row.clone();
                id
            }
            None => {
                tables.last_book_id += 1;
                let id = tables.last_book_id;
                tables.books.insert(id, row.clone());
                id
            }
        };

        debug!(book_id = id, ?author_id, "book persisted");
        Ok(tables.hydrate_book(id, &row))
    }

    async fn remove(&self, book: &Book) -> StoreResult<()> {
        let id = book.id.ok_or(StoreError::Detached(Book::KIND))?;
        let mut tables = self.tables.write().await;

        tables
            .books
            .remove(&id)
            .map(|_| debug!(book_id = id, "book removed"))
            .ok_or(StoreError::NotFound {
                kind: Book::KIND,
                id,
            })
    }
}
