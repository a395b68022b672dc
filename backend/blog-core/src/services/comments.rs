/// Comment service - handles comment creation, retrieval, and removal
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, NewComment};
use crate::services::permissions;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a comment by ID
    pub async fn get_comment(&self, comment_id: Uuid) -> Result<Comment> {
        comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", comment_id)))
    }

    /// Create a new comment on a post.
    ///
    /// Any authenticated identity may comment on any post; the word filter
    /// on the draft is the only content gate.
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        draft: &NewComment,
    ) -> Result<Comment> {
        draft.validate()?;

        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        user_repo::find_user_by_id(&self.pool, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", author_id)))?;

        let comment =
            comment_repo::create_comment(&self.pool, post_id, author_id, &draft.text).await?;

        Ok(comment)
    }

    /// Comments under a post, newest first
    pub async fn list_post_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let comments = comment_repo::list_comments_by_post(&self.pool, post_id, limit, offset).await?;
        Ok(comments)
    }

    /// Count comments under a post
    pub async fn count_post_comments(&self, post_id: Uuid) -> Result<i64> {
        let count = comment_repo::count_comments_by_post(&self.pool, post_id).await?;
        Ok(count)
    }

    /// Delete a comment. Author-only.
    pub async fn delete_comment(&self, editor_id: Uuid, comment_id: Uuid) -> Result<()> {
        let existing = comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", comment_id)))?;

        if !permissions::can_delete_comment(editor_id, &existing) {
            return Err(AppError::Forbidden(format!(
                "user {} is not the author of comment {}",
                editor_id, comment_id
            )));
        }

        comment_repo::delete_comment(&self.pool, comment_id).await?;
        Ok(())
    }
}
