/// Quill Domain Core Library
///
/// Holds the data model and business rules of the Quill blogging platform:
/// posts organized into groups, comments, the follow graph, and the
/// per-scope post feeds. The presentation layer (routing, templating,
/// sessions) consumes this crate in-process and supplies an authenticated
/// identity to every mutating call.
///
/// # Modules
///
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `validators`: Field-level validation rules and the comment word filter
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `cache`: Feed page caching and invalidation
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `app`: Pool/cache/service wiring for embedding callers
pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod validators;

pub use app::AppContext;
pub use config::Config;
pub use error::{AppError, Result};
