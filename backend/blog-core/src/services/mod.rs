/// Business logic layer for the Quill domain core
///
/// This module provides the high-level operations the presentation layer
/// calls:
/// - Post service: post creation, retrieval, author-only updates
/// - Comment service: commenting with the word filter
/// - Group service: group catalogue management
/// - User service: identity reference management
/// - Follow service: the follow graph
/// - Feed service: per-scope, paginated post feeds
/// - Permissions: ownership checks for mutating operations
pub mod comments;
pub mod feed;
pub mod follow;
pub mod groups;
pub mod permissions;
pub mod posts;
pub mod users;

// Re-export commonly used services
pub use comments::CommentService;
pub use feed::{FeedPage, FeedScope, FeedService};
pub use follow::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;
