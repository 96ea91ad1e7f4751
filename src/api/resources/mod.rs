//! Resource bindings
//!
//! Everything the generic handlers need to know about one resource kind:
//! where its repository lives, what its request payload looks like and how
//! a payload is folded onto an entity.

mod author;
mod book;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::AppState;
use crate::error::Result;
use crate::serializer::Project;
use crate::store::{Entity, Repository};

/// A resource kind served by the generic CRUD handlers.
#[async_trait]
pub trait Resource: Entity + Project + Validate + Default {
    /// Decoded request body for create and update
    type Payload: DeserializeOwned + Send;

    /// The repository backing this resource.
    fn repository(state: &AppState) -> Arc<dyn Repository<Self>>;

    /// Folds `payload` onto `entity`, resolving related references.
    ///
    /// Runs for creation (on a default entity) and update (on the stored
    /// record). Only fields present in the payload change.
    async fn apply(state: &AppState, entity: &mut Self, payload: Self::Payload) -> Result<()>;
}
