/// Feed service - composes paginated, newest-first post feeds per scope
use std::sync::Arc;

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::cache::{CachedPage, FeedCache};
use crate::db::{group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::Post;

/// What slice of the post universe a feed covers.
///
/// Group and author scopes are addressed the way URLs address them (slug,
/// username) and resolve to ids before querying; an unknown slug or username
/// is a not-found outcome, not an empty feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post
    All,
    /// Posts in the group with this slug
    Group(String),
    /// Posts by the author with this username
    Author(String),
    /// Posts by authors this user follows
    Following(Uuid),
}

/// One composed page of a feed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    /// The page actually returned, after clamping
    pub page: u32,
    pub total_pages: u32,
    pub total_posts: u64,
}

/// Cache key builders shared by the composer and the write paths that
/// invalidate scopes.
pub(crate) mod keys {
    use uuid::Uuid;

    pub fn all() -> String {
        "all".to_string()
    }

    pub fn group(group_id: Uuid) -> String {
        format!("group:{}", group_id)
    }

    pub fn author(author_id: Uuid) -> String {
        format!("author:{}", author_id)
    }

    pub fn following(follower_id: Uuid) -> String {
        format!("following:{}", follower_id)
    }
}

/// Scope with its addressing resolved to canonical ids.
enum ResolvedScope {
    All,
    Group(Uuid),
    Author(Uuid),
    Following(Uuid),
}

impl ResolvedScope {
    fn cache_key(&self) -> String {
        match self {
            ResolvedScope::All => keys::all(),
            ResolvedScope::Group(id) => keys::group(*id),
            ResolvedScope::Author(id) => keys::author(*id),
            ResolvedScope::Following(id) => keys::following(*id),
        }
    }
}

/// Clamp a requested page index against the candidate count.
///
/// Returns (page, total_pages). An empty candidate set still has one
/// (empty) page; indices below 1 clamp to the first page and indices past
/// the end clamp to the last page, mirroring the paginator behavior the web
/// layer historically exposed.
fn page_bounds(total_posts: u64, page_size: u32, requested: u32) -> (u32, u32) {
    let size = page_size.max(1) as u64;
    let total_pages = (total_posts.div_ceil(size)).max(1) as u32;
    let page = requested.clamp(1, total_pages);
    (page, total_pages)
}

pub struct FeedService {
    pool: PgPool,
    cache: Option<Arc<FeedCache>>,
    page_size: u32,
}

impl FeedService {
    pub fn new(pool: PgPool, page_size: u32) -> Self {
        Self {
            pool,
            cache: None,
            page_size,
        }
    }

    pub fn with_cache(pool: PgPool, page_size: u32, cache: Arc<FeedCache>) -> Self {
        Self {
            pool,
            cache: Some(cache),
            page_size,
        }
    }

    /// Compose one feed page for a scope.
    ///
    /// Pure read: the result is recomputed per call unless the optional
    /// cache serves it. Cache outcomes are advisory; any miss, error, or
    /// stale id falls through to the store.
    pub async fn compose(&self, scope: &FeedScope, page_index: u32) -> Result<FeedPage> {
        let resolved = self.resolve(scope).await?;
        let scope_key = resolved.cache_key();

        if let Some(cache) = &self.cache {
            match cache.read_page(&scope_key, page_index.max(1)).await {
                Ok(Some(cached)) => {
                    if let Some(page) = self.rehydrate(cached).await? {
                        return Ok(page);
                    }
                    // a cached id no longer resolves; fall through and recompute
                }
                Ok(None) => {}
                Err(e) => warn!("feed cache read failed, recomputing: {}", e),
            }
        }

        let total_posts = self.count(&resolved).await? as u64;
        let (page, total_pages) = page_bounds(total_posts, self.page_size, page_index);
        let limit = self.page_size as i64;
        let offset = (page as i64 - 1) * limit;

        let posts = match &resolved {
            ResolvedScope::All => post_repo::list_posts(&self.pool, limit, offset).await?,
            ResolvedScope::Group(id) => {
                post_repo::list_posts_by_group(&self.pool, *id, limit, offset).await?
            }
            ResolvedScope::Author(id) => {
                post_repo::list_posts_by_author(&self.pool, *id, limit, offset).await?
            }
            ResolvedScope::Following(id) => {
                post_repo::list_posts_by_followed(&self.pool, *id, limit, offset).await?
            }
        };

        if let Some(cache) = &self.cache {
            let cached = CachedPage {
                post_ids: posts.iter().map(|p| p.id).collect(),
                page,
                total_pages,
                total_posts,
            };
            if let Err(err) = cache.write_page(&scope_key, &cached).await {
                tracing::debug!("feed cache write failed: {}", err);
            }
        }

        Ok(FeedPage {
            posts,
            page,
            total_pages,
            total_posts,
        })
    }

    async fn resolve(&self, scope: &FeedScope) -> Result<ResolvedScope> {
        match scope {
            FeedScope::All => Ok(ResolvedScope::All),
            FeedScope::Group(slug) => {
                let group = group_repo::find_group_by_slug(&self.pool, slug)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))?;
                Ok(ResolvedScope::Group(group.id))
            }
            FeedScope::Author(username) => {
                let user = user_repo::find_user_by_username(&self.pool, username)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;
                Ok(ResolvedScope::Author(user.id))
            }
            FeedScope::Following(user_id) => Ok(ResolvedScope::Following(*user_id)),
        }
    }

    async fn count(&self, resolved: &ResolvedScope) -> Result<i64> {
        let count = match resolved {
            ResolvedScope::All => post_repo::count_posts(&self.pool).await?,
            ResolvedScope::Group(id) => post_repo::count_posts_by_group(&self.pool, *id).await?,
            ResolvedScope::Author(id) => post_repo::count_posts_by_author(&self.pool, *id).await?,
            ResolvedScope::Following(id) => {
                post_repo::count_posts_by_followed(&self.pool, *id).await?
            }
        };
        Ok(count)
    }

    /// Turn a cached id list back into a full page.
    ///
    /// Returns None when any cached id no longer exists (the post was
    /// deleted after the page was cached), signalling the caller to
    /// recompute.
    async fn rehydrate(&self, cached: CachedPage) -> Result<Option<FeedPage>> {
        let rows = post_repo::find_posts_by_ids(&self.pool, &cached.post_ids).await?;
        if rows.len() != cached.post_ids.len() {
            return Ok(None);
        }

        let mut by_id: std::collections::HashMap<Uuid, Post> =
            rows.into_iter().map(|p| (p.id, p)).collect();
        let mut posts = Vec::with_capacity(cached.post_ids.len());
        for id in &cached.post_ids {
            match by_id.remove(id) {
                Some(post) => posts.push(post),
                None => return Ok(None),
            }
        }

        Ok(Some(FeedPage {
            posts,
            page: cached.page,
            total_pages: cached.total_pages,
            total_posts: cached.total_posts,
        }))
    }
}
