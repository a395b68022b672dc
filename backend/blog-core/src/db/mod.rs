/// Database access layer
///
/// Repositories are plain async functions over a `PgPool`; referential
/// integrity (cascades, null-on-group-delete, follow-edge uniqueness) is
/// enforced by the schema in `schema.rs`.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod schema;
pub mod user_repo;
