//! Connection pool integration tests
//!
//! Pool creation, metered acquisition, and exhaustion behavior. Runs against
//! TEST_DATABASE_URL; skips when it is not set.

use db_pool::{acquire_with_metrics, create_pool, DbConfig};
use sqlx::PgPool;
use std::sync::Arc;

/// Small pool against the test database, or None (after a notice) when
/// TEST_DATABASE_URL is not set.
async fn try_pool(max_connections: u32) -> Option<PgPool> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping pool test");
            return None;
        }
    };

    let config = DbConfig {
        service_name: "pool-test".to_string(),
        database_url,
        max_connections,
        min_connections: 1,
        connect_timeout_secs: 5,
        // short, so the exhaustion test fails fast instead of hanging
        acquire_timeout_secs: 2,
        idle_timeout_secs: 60,
        max_lifetime_secs: 300,
    };

    Some(
        create_pool(config)
            .await
            .expect("failed to create test pool"),
    )
}

#[tokio::test]
async fn metered_acquire_hands_out_working_connections() {
    let Some(pool) = try_pool(5).await else {
        return;
    };

    let mut conn = acquire_with_metrics(&pool, "pool-test")
        .await
        .expect("acquire should succeed on an idle pool");

    sqlx::query("SELECT 1")
        .execute(&mut *conn)
        .await
        .expect("connection should be usable");
}

#[tokio::test]
async fn exhausted_pool_times_out_instead_of_hanging() {
    let Some(pool) = try_pool(2).await else {
        return;
    };

    let mut held = Vec::new();
    for _ in 0..2 {
        held.push(
            acquire_with_metrics(&pool, "pool-test")
                .await
                .expect("acquire should succeed while capacity remains"),
        );
    }

    let result = acquire_with_metrics(&pool, "pool-test").await;
    assert!(
        matches!(result, Err(sqlx::Error::PoolTimedOut)),
        "expected PoolTimedOut, got: {:?}",
        result.map(|_| ())
    );

    drop(held);
}

#[tokio::test]
async fn concurrent_acquires_share_the_pool_safely() {
    let Some(pool) = try_pool(4).await else {
        return;
    };
    let pool = Arc::new(pool);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            let mut conn = acquire_with_metrics(&pool, "pool-test").await?;
            sqlx::query("SELECT 1").execute(&mut *conn).await.map(|_| ())
        }));
    }

    for handle in handles {
        handle
            .await
            .expect("task panicked")
            .expect("pooled query failed");
    }
}
