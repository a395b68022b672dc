/// User service - manages identity references
///
/// Authentication happens outside this crate; this service only stores the
/// stable identity rows everything else references, and resolves usernames.
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register an identity reference with a unique username
    pub async fn register_user(&self, draft: &NewUser) -> Result<User> {
        draft.validate()?;

        match user_repo::create_user(&self.pool, &draft.username).await {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("username '{}' already exists", draft.username),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        user_repo::find_user_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    /// Get a user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        user_repo::find_user_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))
    }

    /// Delete a user; their posts, comments, and follow edges cascade.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let deleted = user_repo::delete_user(&self.pool, user_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }
        Ok(())
    }
}
