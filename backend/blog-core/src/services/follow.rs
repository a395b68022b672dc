/// Follow service - maintains the directed follow graph
///
/// Both operations are idempotent: repeated calls converge on the same
/// edge-existence state without error. Targets are addressed by username,
/// the way profile URLs address them.
use std::sync::Arc;

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::cache::FeedCache;
use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::services::feed::keys;

pub struct FollowService {
    pool: PgPool,
    cache: Option<Arc<FeedCache>>,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, cache: None }
    }

    pub fn with_cache(pool: PgPool, cache: Arc<FeedCache>) -> Self {
        Self {
            pool,
            cache: Some(cache),
        }
    }

    /// Follow an author by username; returns true if a new edge appeared.
    ///
    /// Following yourself is a successful no-op, as is following someone
    /// you already follow.
    pub async fn follow(&self, follower_id: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username).await?;

        if target == follower_id {
            debug!(%follower_id, "self-follow request ignored");
            return Ok(false);
        }

        let created = follow_repo::create_follow(&self.pool, follower_id, target).await?;
        if created {
            debug!(%follower_id, %target, "follow edge created");
            self.invalidate_following(follower_id).await;
        }

        Ok(created)
    }

    /// Unfollow an author by username; returns true if an edge was removed.
    ///
    /// Unfollowing someone you do not follow is a successful no-op.
    pub async fn unfollow(&self, follower_id: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username).await?;

        let removed = follow_repo::delete_follow(&self.pool, follower_id, target).await?;
        if removed {
            debug!(%follower_id, %target, "follow edge removed");
            self.invalidate_following(follower_id).await;
        }

        Ok(removed)
    }

    /// Is `follower` currently following the author behind `target_username`?
    pub async fn is_following(&self, follower_id: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username).await?;
        let present = follow_repo::follow_exists(&self.pool, follower_id, target).await?;
        Ok(present)
    }

    /// How many followers an author has
    pub async fn follower_count(&self, target_username: &str) -> Result<i64> {
        let target = self.resolve(target_username).await?;
        let count = follow_repo::count_followers(&self.pool, target).await?;
        Ok(count)
    }

    async fn resolve(&self, username: &str) -> Result<Uuid> {
        let user = user_repo::find_user_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;
        Ok(user.id)
    }

    async fn invalidate_following(&self, follower_id: Uuid) {
        if let Some(cache) = &self.cache {
            let scopes = vec![keys::following(follower_id)];
            if let Err(err) = cache.invalidate(&scopes).await {
                tracing::debug!("feed cache invalidation failed: {}", err);
            }
        }
    }
}
