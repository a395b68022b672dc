//! Feed cache integration tests
//!
//! Read-through behavior, write-path invalidation, and the stale-id
//! recompute. Runs only when both TEST_DATABASE_URL and TEST_REDIS_URL are
//! set.

mod common;

use std::sync::Arc;

use serial_test::serial;

use blog_core::cache::FeedCache;
use blog_core::db::post_repo;
use blog_core::models::NewPost;
use blog_core::services::{FeedScope, FeedService, PostService};

async fn cache() -> Option<Arc<FeedCache>> {
    let url = common::redis_url()?;
    let cache = FeedCache::connect(&url, 60)
        .await
        .expect("failed to connect to test redis");
    Some(Arc::new(cache))
}

#[tokio::test]
#[serial]
async fn post_creation_invalidates_cached_pages() {
    let Some(ctx) = common::try_context().await else {
        return;
    };
    let Some(cache) = cache().await else {
        return;
    };

    let author = ctx.user("alice").await;
    let posts = PostService::with_cache(ctx.pool.clone(), cache.clone());
    let feed = FeedService::with_cache(ctx.pool.clone(), 10, cache.clone());

    let first = posts
        .create_post(
            author.id,
            &NewPost {
                text: "first".to_string(),
                group_id: None,
                image_key: None,
            },
        )
        .await
        .unwrap();

    // prime the cache
    let page = feed.compose(&FeedScope::All, 1).await.unwrap();
    assert_eq!(page.posts[0].id, first.id);

    let second = posts
        .create_post(
            author.id,
            &NewPost {
                text: "second".to_string(),
                group_id: None,
                image_key: None,
            },
        )
        .await
        .unwrap();

    // the write invalidated the scope, so the new post is visible
    let page = feed.compose(&FeedScope::All, 1).await.unwrap();
    assert_eq!(page.total_posts, 2);
    assert!(page.posts.iter().any(|p| p.id == second.id));
}

#[tokio::test]
#[serial]
async fn stale_cached_ids_trigger_a_recompute() {
    let Some(ctx) = common::try_context().await else {
        return;
    };
    let Some(cache) = cache().await else {
        return;
    };

    let author = ctx.user("alice").await;
    let doomed = ctx.post(&author, "soon gone", None).await;
    ctx.post(&author, "staying", None).await;

    let feed = FeedService::with_cache(ctx.pool.clone(), 10, cache.clone());

    // prime the cache with both posts
    let page = feed.compose(&FeedScope::All, 1).await.unwrap();
    assert_eq!(page.total_posts, 2);

    // delete behind the cache's back (repo call, no invalidation)
    post_repo::delete_post(&ctx.pool, doomed.id).await.unwrap();

    // rehydration notices the missing id and recomputes from the store
    let page = feed.compose(&FeedScope::All, 1).await.unwrap();
    assert_eq!(page.total_posts, 1);
    assert!(page.posts.iter().all(|p| p.id != doomed.id));
}

#[tokio::test]
#[serial]
async fn cached_and_recomputed_pages_agree() {
    let Some(ctx) = common::try_context().await else {
        return;
    };
    let Some(cache) = cache().await else {
        return;
    };

    let author = ctx.user("alice").await;
    for i in 0..15 {
        ctx.post(&author, &format!("post {}", i), None).await;
    }

    let cold = FeedService::new(ctx.pool.clone(), 10);
    let warm = FeedService::with_cache(ctx.pool.clone(), 10, cache.clone());

    let direct = cold.compose(&FeedScope::All, 2).await.unwrap();
    let miss = warm.compose(&FeedScope::All, 2).await.unwrap(); // fills the cache
    let hit = warm.compose(&FeedScope::All, 2).await.unwrap(); // served from it

    let direct_ids: Vec<_> = direct.posts.iter().map(|p| p.id).collect();
    let miss_ids: Vec<_> = miss.posts.iter().map(|p| p.id).collect();
    let hit_ids: Vec<_> = hit.posts.iter().map(|p| p.id).collect();
    assert_eq!(direct_ids, miss_ids);
    assert_eq!(miss_ids, hit_ids);
    assert_eq!(hit.total_pages, 2);
    assert_eq!(hit.total_posts, 15);
}
