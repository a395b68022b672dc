use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

/// Ensure the Quill tables exist.
///
/// Lazily created at startup to unblock environments where migrations have
/// not been applied yet (fresh developer machines, test databases).
///
/// Deletes that span rows (user → posts → comments → follow edges,
/// group → posts' group reference) run as explicit transactional sequences
/// in the repositories; the foreign keys here are plain references, so an
/// out-of-order delete fails instead of silently cascading. The unique
/// constraint on (follower_id, followed_id) is what makes concurrent
/// follow creation converge on a single edge.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    info!("Ensuring Quill tables exist");

    for ddl in [
        USERS_TABLE,
        GROUPS_TABLE,
        POSTS_TABLE,
        POSTS_FEED_INDEX,
        POSTS_AUTHOR_INDEX,
        POSTS_GROUP_INDEX,
        COMMENTS_TABLE,
        COMMENTS_POST_INDEX,
        FOLLOWS_TABLE,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }

    Ok(())
}

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const GROUPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS groups (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    author_id UUID NOT NULL REFERENCES users(id),
    text TEXT NOT NULL,
    group_id UUID REFERENCES groups(id),
    image_key TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const POSTS_FEED_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_feed ON posts (created_at DESC, id DESC)
"#;

const POSTS_AUTHOR_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_author ON posts (author_id, created_at DESC)
"#;

const POSTS_GROUP_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_group ON posts (group_id, created_at DESC)
"#;

const COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    post_id UUID NOT NULL REFERENCES posts(id),
    author_id UUID NOT NULL REFERENCES users(id),
    text TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const COMMENTS_POST_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id, created_at DESC)
"#;

const FOLLOWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS follows (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    follower_id UUID NOT NULL REFERENCES users(id),
    followed_id UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT follows_edge_unique UNIQUE (follower_id, followed_id)
)
"#;
