/// Group service - manages the topical group catalogue
///
/// Groups are created administratively; deleting one never deletes posts,
/// it only clears their group reference.
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::{Group, NewGroup};

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group with a unique slug
    pub async fn create_group(&self, draft: &NewGroup) -> Result<Group> {
        draft.validate()?;

        match group_repo::create_group(&self.pool, &draft.title, &draft.slug, &draft.description)
            .await
        {
            Ok(group) => Ok(group),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("group slug '{}' already exists", draft.slug),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a group by ID
    pub async fn get_group(&self, group_id: Uuid) -> Result<Group> {
        group_repo::find_group_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group {}", group_id)))
    }

    /// Get a group by its URL slug
    pub async fn get_group_by_slug(&self, slug: &str) -> Result<Group> {
        group_repo::find_group_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))
    }

    /// List all groups
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups = group_repo::list_groups(&self.pool).await?;
        Ok(groups)
    }

    /// Delete a group; its posts survive with a cleared group reference.
    pub async fn delete_group(&self, group_id: Uuid) -> Result<()> {
        let deleted = group_repo::delete_group(&self.pool, group_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("group {}", group_id)));
        }
        Ok(())
    }
}
