/// Post service - handles post creation, retrieval, and author-only changes
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::FeedCache;
use crate::db::{group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{NewPost, Post, PostUpdate};
use crate::services::feed::keys;
use crate::services::permissions;

pub struct PostService {
    pool: PgPool,
    cache: Option<Arc<FeedCache>>,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, cache: None }
    }

    pub fn with_cache(pool: PgPool, cache: Arc<FeedCache>) -> Self {
        Self {
            pool,
            cache: Some(cache),
        }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }

    /// Create a new post for an authenticated author.
    ///
    /// The author reference is set here, once; nothing later can reassign
    /// it. A group reference, when present, must point at an existing group.
    pub async fn create_post(&self, author_id: Uuid, draft: &NewPost) -> Result<Post> {
        draft.validate()?;

        user_repo::find_user_by_id(&self.pool, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", author_id)))?;

        if let Some(group_id) = draft.group_id {
            group_repo::find_group_by_id(&self.pool, group_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("group {}", group_id)))?;
        }

        let post = post_repo::create_post(
            &self.pool,
            author_id,
            &draft.text,
            draft.group_id,
            draft.image_key.as_deref(),
        )
        .await?;

        let mut scopes = vec![keys::all(), keys::author(author_id)];
        if let Some(group_id) = post.group_id {
            scopes.push(keys::group(group_id));
        }
        self.invalidate(scopes).await;

        Ok(post)
    }

    /// Replace a post's mutable fields. Author-only.
    pub async fn update_post(
        &self,
        editor_id: Uuid,
        post_id: Uuid,
        update: &PostUpdate,
    ) -> Result<Post> {
        update.validate()?;

        let existing = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        if !permissions::can_edit_post(editor_id, &existing) {
            return Err(AppError::Forbidden(format!(
                "user {} is not the author of post {}",
                editor_id, post_id
            )));
        }

        if let Some(group_id) = update.group_id {
            group_repo::find_group_by_id(&self.pool, group_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("group {}", group_id)))?;
        }

        let post = post_repo::update_post(
            &self.pool,
            post_id,
            &update.text,
            update.group_id,
            update.image_key.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let mut scopes = vec![keys::all(), keys::author(existing.author_id)];
        for group_id in [existing.group_id, post.group_id].into_iter().flatten() {
            let key = keys::group(group_id);
            if !scopes.contains(&key) {
                scopes.push(key);
            }
        }
        self.invalidate(scopes).await;

        Ok(post)
    }

    /// Delete a post together with its comments. Author-only.
    pub async fn delete_post(&self, editor_id: Uuid, post_id: Uuid) -> Result<()> {
        let existing = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        if !permissions::can_edit_post(editor_id, &existing) {
            return Err(AppError::Forbidden(format!(
                "user {} is not the author of post {}",
                editor_id, post_id
            )));
        }

        post_repo::delete_post(&self.pool, post_id).await?;

        let mut scopes = vec![keys::all(), keys::author(existing.author_id)];
        if let Some(group_id) = existing.group_id {
            scopes.push(keys::group(group_id));
        }
        self.invalidate(scopes).await;

        Ok(())
    }

    /// Invalidate cached feed scopes after a write (fire-and-forget, the
    /// TTL bounds staleness if Redis is briefly unreachable).
    async fn invalidate(&self, scopes: Vec<String>) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.invalidate(&scopes).await {
                tracing::debug!("feed cache invalidation failed: {}", err);
            }
        }
    }
}
