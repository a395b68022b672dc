use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::{AppError, Result};

/// Feed page cache backed by Redis.
///
/// One hash per feed scope (`feed:v1:<scope>`), one field per page index, so
/// invalidating a scope is a single `DEL`. Entries expire on a TTL; the
/// composer treats every cache outcome as advisory and can always recompute
/// from the store.
#[derive(Clone)]
pub struct FeedCache {
    redis: ConnectionManager,
    default_ttl: Duration,
}

/// Cached feed page: post ids plus the pagination metadata computed when the
/// page was composed. Posts are rehydrated from the store on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPage {
    pub post_ids: Vec<uuid::Uuid>,
    pub page: u32,
    pub total_pages: u32,
    pub total_posts: u64,
}

impl FeedCache {
    /// Connect to Redis and return a cache handle.
    pub async fn connect(url: &str, default_ttl_secs: u64) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let redis = ConnectionManager::new(client).await?;
        Ok(Self {
            redis,
            default_ttl: Duration::from_secs(default_ttl_secs),
        })
    }

    pub fn new(redis: ConnectionManager, default_ttl_secs: u64) -> Self {
        Self {
            redis,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    fn scope_hash_key(scope: &str) -> String {
        format!("feed:v1:{}", scope)
    }

    /// Read a cached page for (scope, page index).
    pub async fn read_page(&self, scope: &str, page: u32) -> Result<Option<CachedPage>> {
        let key = Self::scope_hash_key(scope);
        let mut conn = self.redis.clone();

        match conn.hget::<_, _, Option<String>>(&key, page).await {
            Ok(Some(data)) => {
                debug!("Feed cache HIT for scope {} page {}", scope, page);
                serde_json::from_str::<CachedPage>(&data)
                    .map(Some)
                    .map_err(|e| {
                        error!("Failed to deserialize cached feed page: {}", e);
                        AppError::Internal(format!("Cache deserialization error: {}", e))
                    })
            }
            Ok(None) => {
                debug!("Feed cache MISS for scope {} page {}", scope, page);
                Ok(None)
            }
            Err(e) => {
                warn!("Redis read error for feed cache: {}", e);
                Err(AppError::Cache(e))
            }
        }
    }

    /// Store a composed page under its scope hash.
    pub async fn write_page(&self, scope: &str, cached: &CachedPage) -> Result<()> {
        let key = Self::scope_hash_key(scope);

        let data = serde_json::to_string(cached).map_err(|e| {
            error!("Failed to serialize feed page for cache: {}", e);
            AppError::Internal(format!("Cache serialization error: {}", e))
        })?;

        // Jitter the TTL so scopes written together do not expire together.
        let jitter = (rand::random::<u32>() % 10) as f64 / 100.0;
        let jitter_secs = (self.default_ttl.as_secs_f64() * jitter).round() as u64;
        let final_ttl = self.default_ttl + Duration::from_secs(jitter_secs);

        let mut conn = self.redis.clone();
        conn.hset::<_, _, _, ()>(&key, cached.page, data)
            .await
            .map_err(|e| {
                warn!("Failed to write feed cache: {}", e);
                AppError::Cache(e)
            })?;
        conn.expire::<_, ()>(&key, final_ttl.as_secs() as i64)
            .await
            .map_err(|e| {
                warn!("Failed to set feed cache TTL: {}", e);
                AppError::Cache(e)
            })?;

        debug!(
            "Feed cache WRITE for scope {} page {} ({} posts) with TTL {:?}",
            scope,
            cached.page,
            cached.post_ids.len(),
            final_ttl
        );

        Ok(())
    }

    /// Drop every cached page for the given scopes.
    ///
    /// Called by the write path after a post or follow mutation.
    pub async fn invalidate(&self, scopes: &[String]) -> Result<()> {
        let mut conn = self.redis.clone();
        for scope in scopes {
            let key = Self::scope_hash_key(scope);
            conn.del::<_, ()>(&key)
                .await
                .map_err(AppError::Cache)?;
            debug!("Feed cache INVALIDATE for scope {}", scope);
        }

        Ok(())
    }
}
