use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Idempotent create of a follow edge; returns true if a new row was
/// inserted. The unique constraint on (follower_id, followed_id) makes two
/// racing creates converge on a single edge.
pub async fn create_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO follows (follower_id, followed_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent delete of a follow edge; returns true if a row was removed.
pub async fn delete_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Does the follow edge exist?
pub async fn follow_exists(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2
        ) as present
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("present"))
}

/// Count edges pointing at an author (their follower count)
pub async fn count_followers(pool: &PgPool, followed_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM follows WHERE followed_id = $1")
        .bind(followed_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
