//! Wiring smoke test: an assembled context drives a full author → post →
//! comment → feed flow. Runs against TEST_DATABASE_URL; skips when unset.

mod common;

use serial_test::serial;

use blog_core::app::AppContext;
use blog_core::models::{NewComment, NewPost, NewUser};
use blog_core::services::FeedScope;

#[tokio::test]
#[serial]
async fn assembled_context_supports_the_publishing_flow() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let app = AppContext::assemble(ctx.pool.clone(), None, 10);

    let author = app
        .users
        .register_user(&NewUser {
            username: "writer".to_string(),
        })
        .await
        .unwrap();

    let post = app
        .posts
        .create_post(
            author.id,
            &NewPost {
                text: "hello from the wiring test".to_string(),
                group_id: None,
                image_key: None,
            },
        )
        .await
        .unwrap();

    app.comments
        .add_comment(
            author.id,
            post.id,
            &NewComment {
                text: "first".to_string(),
            },
        )
        .await
        .unwrap();

    let page = app.feed.compose(&FeedScope::All, 1).await.unwrap();
    assert_eq!(page.total_posts, 1);
    assert_eq!(page.posts[0].id, post.id);
    assert_eq!(app.comments.count_post_comments(post.id).await.unwrap(), 1);
}
