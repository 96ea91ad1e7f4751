//! Author resource binding

use std::sync::Arc;

use async_trait::async_trait;

use super::Resource;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{Author, AuthorPayload};
use crate::store::Repository;

#[async_trait]
impl Resource for Author {
    type Payload = AuthorPayload;

    fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
        state.authors.clone()
    }

    async fn apply(_state: &AppState, author: &mut Self, payload: AuthorPayload) -> Result<()> {
        payload.merge_into(author);
        Ok(())
    }
}
