//! Shared cache handle
//!
//! Cloneable async front of `TagCache`, created once at startup and threaded
//! through request handlers.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, TagCache};

/// Thread-safe handle to one `TagCache`.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<TagCache>>,
}

impl SharedCache {
    pub fn new(cache: TagCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Read-through lookup.
    ///
    /// On a hit the stored bytes are returned. On a miss `compute` runs with
    /// no lock held and its result is stored under `key` and every tag,
    /// unless one of those tags was invalidated while `compute` ran. Two
    /// concurrent misses on the same key both compute; the last insert
    /// wins. A failed `compute` stores nothing.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        tags: &[&str],
        compute: F,
    ) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        let seen = {
            let mut cache = self.inner.write().await;
            if let Some(hit) = cache.get(key) {
                debug!(key, "cache hit");
                return Ok(hit);
            }
            cache.generations(tags)
        };

        debug!(key, "cache miss, computing");
        let value = compute().await?;

        let stored = self
            .inner
            .write()
            .await
            .insert_if_current(key.to_string(), value.clone(), tags, &seen);
        if !stored {
            debug!(key, "invalidated while computing, result not cached");
        }
        Ok(value)
    }

    /// Removes every entry stored under `tag`.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let removed = self.inner.write().await.invalidate_tag(tag);
        info!(tag, removed, "cache tag invalidated");
        removed
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.contains_key(key)
    }
}
