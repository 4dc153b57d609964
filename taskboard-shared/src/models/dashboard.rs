/// Dashboard summary aggregate
///
/// Counts are computed in one round trip with `COUNT(*) FILTER (...)`.
/// `from_parts` applies the same predicates in memory; it is the reference
/// the SQL is tested against.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::task::{Task, TaskState};

/// Per-owner counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DashboardSummary {
    /// Projects owned
    pub projects: i64,

    /// Tasks across all owned projects
    pub tasks: i64,

    /// Tasks in `Done`
    pub completed_tasks: i64,

    /// Tasks in `InProgress`
    pub in_progress_tasks: i64,

    /// Tasks due on or after `today` that are not done
    pub upcoming_tasks: i64,
}

impl DashboardSummary {
    /// Loads the summary for `owner_id`, with `today` as the upcoming cut-off
    pub async fn for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<Self, sqlx::Error> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects WHERE owner_id = $1) AS projects,
                COUNT(t.id) AS tasks,
                COUNT(t.id) FILTER (WHERE t.state = $3) AS completed_tasks,
                COUNT(t.id) FILTER (WHERE t.state = $4) AS in_progress_tasks,
                COUNT(t.id) FILTER (WHERE t.due_date >= $2 AND t.state <> $3) AS upcoming_tasks
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.owner_id = $1
            "#,
        )
        .bind(owner_id)
        .bind(today)
        .bind(TaskState::Done)
        .bind(TaskState::InProgress)
        .fetch_one(pool)
        .await?;

        Ok(summary)
    }

    /// Computes the summary from already-loaded rows
    pub fn from_parts(projects: i64, tasks: &[Task], today: NaiveDate) -> Self {
        Self {
            projects,
            tasks: tasks.len() as i64,
            completed_tasks: tasks.iter().filter(|t| t.state == TaskState::Done).count() as i64,
            in_progress_tasks: tasks
                .iter()
                .filter(|t| t.state == TaskState::InProgress)
                .count() as i64,
            upcoming_tasks: tasks.iter().filter(|t| t.is_upcoming(today)).count() as i64,
        }
    }
}
