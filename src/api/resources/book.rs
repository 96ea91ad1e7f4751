//! Book resource binding
//!
//! Resolves `idAuthor` against the author repository while merging.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::Resource;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{Book, BookPayload};
use crate::store::{Repository, StoreError};

#[async_trait]
impl Resource for Book {
    type Payload = BookPayload;

    fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
        state.books.clone()
    }

    /// An `idAuthor` that does not resolve leaves the book without an
    /// author rather than failing the request. An absent `idAuthor` keeps
    /// the current link.
    async fn apply(state: &AppState, book: &mut Self, payload: BookPayload) -> Result<()> {
        payload.merge_into(book);

        let Some(author_id) = payload.id_author else {
            return Ok(());
        };

        match state.authors.find_by_id(author_id).await {
            Ok(author) => book.set_author(Some(&author)),
            Err(StoreError::NotFound { .. }) => {
                info!(author_id, "idAuthor does not resolve, leaving book unlinked");
                book.set_author(None);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
