//! Serializer Module
//!
//! Encodes entities through explicit group-view projections and decodes
//! request payloads.

mod version;
pub mod views;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use version::ApiVersion;

// == Group View ==
/// Named field whitelist selected per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupView {
    /// Collection endpoints: related entities as summaries
    List,
    /// Single-resource endpoints: related entities expanded
    Detail,
}

// == Serialize Error ==
#[derive(Error, Debug)]
pub enum SerializeError {
    /// The request body is not a well-formed payload
    #[error("Malformed request body: {0}")]
    Decode(String),

    #[error("Failed to encode response: {0}")]
    Encode(String),
}

// == Project ==
/// Maps an entity onto the representation a view exposes.
///
/// Implementations branch on `version` wherever fields differ across API
/// versions.
pub trait Project {
    type View: Serialize;

    fn project(&self, view: GroupView, version: ApiVersion) -> Self::View;
}

/// Encodes one entity as JSON.
pub fn encode<T: Project>(
    entity: &T,
    view: GroupView,
    version: ApiVersion,
) -> Result<Bytes, SerializeError> {
    serde_json::to_vec(&entity.project(view, version))
        .map(Bytes::from)
        .map_err(|e| SerializeError::Encode(e.to_string()))
}

/// Encodes a list of entities as a JSON array.
pub fn encode_list<T: Project>(
    entities: &[T],
    view: GroupView,
    version: ApiVersion,
) -> Result<Bytes, SerializeError> {
    let views: Vec<T::View> = entities.iter().map(|e| e.project(view, version)).collect();
    serde_json::to_vec(&views)
        .map(Bytes::from)
        .map_err(|e| SerializeError::Encode(e.to_string()))
}

/// Decodes a request body into a payload type.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, SerializeError> {
    serde_json::from_slice(body).map_err(|e| SerializeError::Decode(e.to_string()))
}
