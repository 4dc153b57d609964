/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('not_started', 'in_progress', 'done');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(100) NOT NULL,
///     description VARCHAR(300) NOT NULL,
///     status project_status NOT NULL DEFAULT 'not_started',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::project::{CreateProject, Project, ProjectStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
/// let project = Project::create(&pool, CreateProject {
///     owner_id,
///     name: "Website".to_string(),
///     description: "Relaunch the marketing site".to_string(),
///     status: ProjectStatus::InProgress,
/// }).await?;
///
/// let mine = Project::list_for_owner(&pool, owner_id).await?;
/// assert_eq!(mine[0].id, project.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::InvalidCode;

/// Project lifecycle status
///
/// Serialized on the wire as an integer code (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(try_from = "u8", into = "u8")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Done,
}

impl From<ProjectStatus> for u8 {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::NotStarted => 0,
            ProjectStatus::InProgress => 1,
            ProjectStatus::Done => 2,
        }
    }
}

impl TryFrom<u8> for ProjectStatus {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProjectStatus::NotStarted),
            1 => Ok(ProjectStatus::InProgress),
            2 => Ok(ProjectStatus::Done),
            _ => Err(InvalidCode {
                kind: "project status",
                code,
            }),
        }
    }
}

/// A project owned by one user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    /// Name (3-100 chars)
    pub name: String,

    /// Description (10-300 chars)
    pub description: String,

    /// Current status
    pub status: ProjectStatus,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

/// Replacement values for an existing project
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a project for `data.owner_id`
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (owner_id, name, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, description, status, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .fetch_one(executor)
        .await?;

        Ok(project)
    }

    /// Lists an owner's projects, newest first
    pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, name, description, status, created_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project by ID, only if `owner_id` owns it
    pub async fn find_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, name, description, status, created_at
            FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Replaces a project's editable fields
    ///
    /// Returns `None` when the project does not exist or belongs to someone
    /// else; the two cases are deliberately indistinguishable.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $3,
                description = $4,
                status = $5
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, description, status, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project and, via cascade, its tasks
    ///
    /// Returns false when nothing owned by `owner_id` matched.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts an owner's projects
    pub async fn count_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
