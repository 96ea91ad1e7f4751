//! Cache Module
//!
//! Read-through response cache with tag-based bulk invalidation.

mod entry;
mod handle;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::SharedCache;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::TagCache;

// == Public Constants ==
/// Tag shared by every list page of both resource kinds: book pages embed
/// authors and author pages embed books, so a write to either kind must
/// drop both.
pub const BOOKS_CACHE_TAG: &str = "booksCache";
