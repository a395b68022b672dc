/// Feed caching layer
///
/// Optional Redis-backed read-through cache for composed feed pages, with
/// explicit per-scope invalidation on writes.
pub mod feed_cache;

pub use feed_cache::{CachedPage, FeedCache};
