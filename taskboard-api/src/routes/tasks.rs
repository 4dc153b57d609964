/// Task endpoints
///
/// Tasks have no owner of their own; access goes through the parent
/// project's owner. A task body may only point at a project the caller owns.
///
/// # Endpoints
///
/// - `GET /api/tasks` - List own tasks, earliest due first
/// - `POST /api/tasks` - Create a task
/// - `PUT /api/tasks/:id` - Replace a task's fields
/// - `DELETE /api/tasks/:id` - Delete a task

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::task::{Task, TaskFields, TaskPriority, TaskState},
};
use uuid::Uuid;
use validator::Validate;

use super::resource_id;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

const NOT_FOUND: &str = "Task not found.";
const FOREIGN_PROJECT: &str = "Project does not exist for this user.";

/// Body of create and update requests
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters."))]
    pub title: String,

    pub priority: TaskPriority,

    pub state: TaskState,

    /// `YYYY-MM-DD`
    pub due_date: NaiveDate,

    pub project_id: Uuid,
}

impl TaskRequest {
    /// Trims the title and validates the request
    fn into_fields(mut self) -> ApiResult<TaskFields> {
        self.title = self.title.trim().to_string();
        self.validate()?;

        Ok(TaskFields {
            project_id: self.project_id,
            title: self.title,
            priority: self.priority,
            state: self.state,
            due_date: self.due_date,
        })
    }
}

/// Task as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub priority: TaskPriority,
    pub state: TaskState,
    pub due_date: NaiveDate,
    pub project_id: Uuid,
    pub created_on_utc: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            priority: task.priority,
            state: task.state,
            due_date: task.due_date,
            project_id: task.project_id,
            created_on_utc: task.created_at,
        }
    }
}

/// List the caller's tasks across all their projects
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_for_owner(&state.db, auth.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <jwt_token>
///
/// {
///   "title": "Write tests",
///   "priority": 2,
///   "state": 0,
///   "dueDate": "2025-03-01",
///   "projectId": "uuid"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or the project is not the caller's
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<TaskResponse>)> {
    let Json(req) = payload?;
    let fields = req.into_fields()?;

    let task = Task::create_for_owner(&state.db, auth.user_id, fields)
        .await?
        .ok_or_else(|| ApiError::BadRequest(FOREIGN_PROJECT.to_string()))?;
    tracing::debug!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    let location = format!("/api/tasks/{}", task.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task.into()),
    ))
}

/// Replace a task's fields, possibly moving it to another owned project
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or the target project is not the caller's
/// - `404 Not Found`: No such task for this user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let id = resource_id(path, NOT_FOUND)?;
    let Json(req) = payload?;
    let fields = req.into_fields()?;

    if Task::find_for_owner(&state.db, id, auth.user_id).await?.is_none() {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    // The task is known to be the caller's, so no match means a foreign target project.
    let task = Task::update_for_owner(&state.db, id, auth.user_id, fields)
        .await?
        .ok_or_else(|| ApiError::BadRequest(FOREIGN_PROJECT.to_string()))?;

    Ok(Json(task.into()))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = resource_id(path, NOT_FOUND)?;

    if !Task::delete_for_owner(&state.db, id, auth.user_id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
