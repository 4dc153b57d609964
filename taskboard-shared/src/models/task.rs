/// Task model and database operations
///
/// A task has no owner column of its own: ownership is inherited from its
/// project, so every owner-scoped statement joins through `projects`.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
/// CREATE TYPE task_state AS ENUM ('not_started', 'in_progress', 'done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(120) NOT NULL,
///     priority task_priority NOT NULL DEFAULT 'medium',
///     state task_state NOT NULL DEFAULT 'not_started',
///     due_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::InvalidCode;

/// Task priority, serialized as an integer code (0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> Self {
        match priority {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
        }
    }
}

impl TryFrom<u8> for TaskPriority {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TaskPriority::Low),
            1 => Ok(TaskPriority::Medium),
            2 => Ok(TaskPriority::High),
            _ => Err(InvalidCode {
                kind: "task priority",
                code,
            }),
        }
    }
}

/// Task progress state, serialized as an integer code (0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_state", rename_all = "snake_case")]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskState {
    NotStarted,
    InProgress,
    Done,
}

impl TaskState {
    /// Checks if the task is finished
    pub fn is_done(&self) -> bool {
        matches!(self, TaskState::Done)
    }
}

impl From<TaskState> for u8 {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::NotStarted => 0,
            TaskState::InProgress => 1,
            TaskState::Done => 2,
        }
    }
}

impl TryFrom<u8> for TaskState {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TaskState::NotStarted),
            1 => Ok(TaskState::InProgress),
            2 => Ok(TaskState::Done),
            _ => Err(InvalidCode {
                kind: "task state",
                code,
            }),
        }
    }
}

/// A task inside a project
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Parent project
    pub project_id: Uuid,

    /// Title (3-120 chars)
    pub title: String,

    pub priority: TaskPriority,

    pub state: TaskState,

    /// Calendar due date
    pub due_date: NaiveDate,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Due today or later and not yet done
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.due_date >= today && !self.state.is_done()
    }
}

/// Field values for creating or replacing a task
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub project_id: Uuid,
    pub title: String,
    pub priority: TaskPriority,
    pub state: TaskState,
    pub due_date: NaiveDate,
}

impl Task {
    /// Creates a task in a project owned by `owner_id`
    ///
    /// The ownership check and the insert are one statement. Returns `None`
    /// when `data.project_id` does not exist or belongs to someone else.
    pub async fn create_for_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: Uuid,
        data: TaskFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, priority, state, due_date)
            SELECT p.id, $3, $4, $5, $6
            FROM projects p
            WHERE p.id = $1 AND p.owner_id = $2
            RETURNING id, project_id, title, priority, state, due_date, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.priority)
        .bind(data.state)
        .bind(data.due_date)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    /// Lists every task in projects owned by `owner_id`, earliest due first
    pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.priority, t.state, t.due_date, t.created_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.owner_id = $1
            ORDER BY t.due_date ASC, t.created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists the tasks of one project, only if `owner_id` owns the project
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.priority, t.state, t.due_date, t.created_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.project_id = $1 AND p.owner_id = $2
            ORDER BY t.due_date ASC, t.created_at ASC
            "#,
        )
        .bind(project_id)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID, only if its project belongs to `owner_id`
    pub async fn find_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.priority, t.state, t.due_date, t.created_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Replaces a task's fields, including moving it to another project
    ///
    /// Matches only when both the task's current project and the target
    /// project belong to `owner_id`.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: TaskFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET project_id = $3,
                title = $4,
                priority = $5,
                state = $6,
                due_date = $7
            FROM projects p
            WHERE t.id = $1
              AND p.id = t.project_id
              AND p.owner_id = $2
              AND EXISTS (SELECT 1 FROM projects target WHERE target.id = $3 AND target.owner_id = $2)
            RETURNING t.id, t.project_id, t.title, t.priority, t.state, t.due_date, t.created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.priority)
        .bind(data.state)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task if its project belongs to `owner_id`
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(state: TaskState, due_date: NaiveDate) -> Task {
        Task {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Write tests".to_string(),
            priority: TaskPriority::Medium,
            state,
            due_date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_enum_codes() {
        assert_eq!(TaskPriority::try_from(0), Ok(TaskPriority::Low));
        assert_eq!(TaskPriority::try_from(2), Ok(TaskPriority::High));
        assert!(TaskPriority::try_from(3).is_err());

        assert_eq!(TaskState::try_from(1), Ok(TaskState::InProgress));
        assert_eq!(u8::from(TaskState::Done), 2);
        assert!(TaskState::try_from(255).is_err());
    }

    #[test]
    fn test_task_json_shape() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let value = serde_json::to_value(task(TaskState::InProgress, due)).unwrap();

        assert_eq!(value["state"], 1);
        assert_eq!(value["priority"], 1);
        assert_eq!(value["due_date"], "2025-03-14");
    }

    #[test]
    fn test_is_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert!(task(TaskState::NotStarted, today).is_upcoming(today));
        assert!(task(TaskState::InProgress, tomorrow).is_upcoming(today));
        assert!(!task(TaskState::Done, tomorrow).is_upcoming(today));
        assert!(!task(TaskState::NotStarted, yesterday).is_upcoming(today));
    }
}
