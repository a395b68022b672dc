/// Data models for the Quill domain core
///
/// Row types mirror the tables created by `db::schema`; draft types carry
/// the validation rules applied before anything is written.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An authenticated identity, referenced by a stable id and unique username.
///
/// Authentication itself lives outside this crate; the presentation layer
/// hands every mutating call the id of an already-authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A named topical category for posts.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A unit of authored content.
///
/// `author_id` and `created_at` are set at creation and never change.
/// `image_key` is an opaque blob reference; this crate never interprets
/// image bytes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A reply attached to exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A directed edge meaning "follower follows followed".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Draft for registering a user identity reference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 3, max = 32, message = "username must be 3 to 32 characters"),
        custom(function = "crate::validators::username_is_well_formed")
    )]
    pub username: String,
}

/// Draft for creating a group.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGroup {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "slug must not be empty"),
        custom(function = "crate::validators::slug_is_url_safe")
    )]
    pub slug: String,
    pub description: String,
}

/// Draft for creating a post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, message = "post text must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

/// Full-replace update of a post's mutable fields.
///
/// `group_id: None` clears the group reference; author and creation
/// timestamp are not touchable through updates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostUpdate {
    #[validate(length(min = 1, message = "post text must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

/// Draft for creating a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    #[validate(
        length(min = 1, message = "comment text must not be empty"),
        custom(function = "crate::validators::comment_text_is_clean")
    )]
    pub text: String,
}
