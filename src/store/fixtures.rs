//! Demo data for local runs (`SEED_FIXTURES=true`).

use tracing::info;

use super::{MemoryStore, Repository, StoreResult};
use crate::models::{Author, Book};

const AUTHOR_COUNT: usize = 10;
const BOOK_COUNT: usize = 20;

/// Seeds 10 authors and 20 books; book `i` belongs to author `i % 10`.
pub async fn seed_fixtures(store: &MemoryStore) -> StoreResult<()> {
    let mut authors = Vec::with_capacity(AUTHOR_COUNT);
    for i in 0..AUTHOR_COUNT {
        let author = Author::new(format!("First name {i}"), format!("Last name {i}"));
        authors.push(Repository::<Author>::persist(store, author).await?);
    }

    for i in 0..BOOK_COUNT {
        let mut book = Book::new(
            format!("Book title {i}"),
            format!("Back cover of book number {i}"),
        );
        book.comment = Some(format!("Reader comment on book {i}"));
        book.set_author(authors.get(i % AUTHOR_COUNT));
        Repository::<Book>::persist(store, book).await?;
    }

    info!(
        authors = AUTHOR_COUNT,
        books = BOOK_COUNT,
        "Fixtures loaded"
    );
    Ok(())
}
