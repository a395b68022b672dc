//! Shared harness for database-backed integration tests
//!
//! Reads TEST_DATABASE_URL (and TEST_REDIS_URL where a suite needs Redis);
//! when the variable is unset the suite skips, so the pure unit tests still
//! run on machines without local infrastructure.
#![allow(dead_code)]

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use blog_core::db::schema;
use blog_core::models::{Group, NewGroup, NewPost, NewUser, Post, User};
use blog_core::services::{GroupService, PostService, UserService};

pub struct TestContext {
    pub pool: PgPool,
}

/// Connect to the test database, ensure the schema, and wipe all rows.
/// Returns None (after a notice) when TEST_DATABASE_URL is not set.
pub async fn try_context() -> Option<TestContext> {
    dotenvy::dotenv().ok();

    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    schema::ensure_schema(&pool)
        .await
        .expect("failed to ensure test schema");

    let ctx = TestContext { pool };
    ctx.reset().await;
    Some(ctx)
}

pub fn redis_url() -> Option<String> {
    match std::env::var("TEST_REDIS_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("TEST_REDIS_URL not set; skipping cache-backed test");
            None
        }
    }
}

impl TestContext {
    /// Remove every row; referencing tables are listed so no CASCADE is
    /// needed.
    pub async fn reset(&self) {
        sqlx::query("TRUNCATE TABLE follows, comments, posts, groups, users")
            .execute(&self.pool)
            .await
            .expect("failed to reset test tables");
    }

    pub async fn user(&self, username: &str) -> User {
        UserService::new(self.pool.clone())
            .register_user(&NewUser {
                username: username.to_string(),
            })
            .await
            .expect("failed to create test user")
    }

    pub async fn group(&self, slug: &str) -> Group {
        GroupService::new(self.pool.clone())
            .create_group(&NewGroup {
                title: format!("The {} group", slug),
                slug: slug.to_string(),
                description: String::new(),
            })
            .await
            .expect("failed to create test group")
    }

    pub async fn post(&self, author: &User, text: &str, group_id: Option<Uuid>) -> Post {
        PostService::new(self.pool.clone())
            .create_post(
                author.id,
                &NewPost {
                    text: text.to_string(),
                    group_id,
                    image_key: None,
                },
            )
            .await
            .expect("failed to create test post")
    }

    pub async fn follow_edge_count(&self, follower_id: Uuid, followed_id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await
        .expect("failed to count follow edges")
    }
}

/// Assert a post slice is ordered newest-first with the id tiebreak.
pub fn assert_newest_first(posts: &[Post]) {
    for pair in posts.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.created_at, a.id) >= (b.created_at, b.id),
            "posts out of order: {:?} before {:?}",
            (a.created_at, a.id),
            (b.created_at, b.id)
        );
    }
}
