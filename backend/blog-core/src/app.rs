/// Application wiring
///
/// Builds the connection pool, the optional feed cache, and the service set
/// from a `Config`. The presentation layer holds one `AppContext` and calls
/// services through it; nothing here keeps state beyond the shared pool and
/// cache handles.
use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::cache::FeedCache;
use crate::config::Config;
use crate::db::schema;
use crate::error::Result;
use crate::services::{
    CommentService, FeedService, FollowService, GroupService, PostService, UserService,
};

pub struct AppContext {
    pub pool: PgPool,
    pub posts: PostService,
    pub comments: CommentService,
    pub groups: GroupService,
    pub users: UserService,
    pub follow: FollowService,
    pub feed: FeedService,
}

impl AppContext {
    /// Connect the pool, ensure the schema, connect the cache when enabled,
    /// and wire the services.
    ///
    /// An unreachable Redis downgrades to running without the cache; an
    /// unreachable database is fatal.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let db_config = db_pool::DbConfig {
            service_name: "blog-core".to_string(),
            database_url: config.database.url.clone(),
            max_connections: config.database.max_connections,
            ..db_pool::DbConfig::default()
        };
        db_config.log_config();
        let pool = db_pool::create_pool(db_config).await?;

        schema::ensure_schema(&pool).await?;

        let cache = if config.cache.enabled {
            match FeedCache::connect(&config.cache.url, config.cache.ttl_secs).await {
                Ok(cache) => {
                    info!("feed cache enabled (ttl {}s)", config.cache.ttl_secs);
                    Some(Arc::new(cache))
                }
                Err(e) => {
                    warn!("feed cache disabled, redis unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self::assemble(pool, cache, config.feed.page_size))
    }

    /// Wire the services over an existing pool (embedded use, tests).
    pub fn assemble(pool: PgPool, cache: Option<Arc<FeedCache>>, page_size: u32) -> Self {
        let posts = match &cache {
            Some(c) => PostService::with_cache(pool.clone(), c.clone()),
            None => PostService::new(pool.clone()),
        };
        let follow = match &cache {
            Some(c) => FollowService::with_cache(pool.clone(), c.clone()),
            None => FollowService::new(pool.clone()),
        };
        let feed = match &cache {
            Some(c) => FeedService::with_cache(pool.clone(), page_size, c.clone()),
            None => FeedService::new(pool.clone(), page_size),
        };

        Self {
            posts,
            follow,
            feed,
            comments: CommentService::new(pool.clone()),
            groups: GroupService::new(pool.clone()),
            users: UserService::new(pool.clone()),
            pool,
        }
    }
}
