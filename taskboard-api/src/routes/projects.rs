/// Project endpoints
///
/// Every handler scopes its query to the authenticated user. A project that
/// belongs to someone else answers exactly like one that does not exist.
///
/// # Endpoints
///
/// - `GET /api/projects` - List own projects, newest first
/// - `POST /api/projects` - Create a project
/// - `PUT /api/projects/:id` - Replace a project's fields
/// - `DELETE /api/projects/:id` - Delete a project and its tasks

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::project::{CreateProject, Project, ProjectStatus, UpdateProject},
};
use uuid::Uuid;
use validator::Validate;

use super::resource_id;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

const NOT_FOUND: &str = "Project not found.";

/// Body of create and update requests
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters."))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 300,
        message = "Description must be between 10 and 300 characters."
    ))]
    pub description: String,

    pub status: ProjectStatus,
}

impl ProjectRequest {
    /// Trims the text fields and validates what remains
    fn into_valid(mut self) -> ApiResult<Self> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.validate()?;
        Ok(self)
    }
}

/// Project as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_on_utc: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            status: project.status,
            created_on_utc: project.created_at,
        }
    }
}

/// List the caller's projects, newest first
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = Project::list_for_owner(&state.db, auth.user_id).await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// Create a project
///
/// ```text
/// POST /api/projects
/// Authorization: Bearer <jwt_token>
///
/// { "name": "Website", "description": "Rebuild the marketing site", "status": 0 }
/// ```
///
/// Answers `201 Created` with a `Location` header.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<ProjectResponse>)> {
    let Json(req) = payload?;
    let req = req.into_valid()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            owner_id: auth.user_id,
            name: req.name,
            description: req.description,
            status: req.status,
        },
    )
    .await?;

    tracing::debug!(project_id = %project.id, user_id = %auth.user_id, "Project created");

    let location = format!("/api/projects/{}", project.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(project.into()),
    ))
}

/// Replace a project's name, description and status
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: No such project for this user
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> ApiResult<Json<ProjectResponse>> {
    let id = resource_id(path, NOT_FOUND)?;
    let Json(req) = payload?;
    let req = req.into_valid()?;

    let project = Project::update_for_owner(
        &state.db,
        id,
        auth.user_id,
        UpdateProject {
            name: req.name,
            description: req.description,
            status: req.status,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(project.into()))
}

/// Delete a project; its tasks go with it
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = resource_id(path, NOT_FOUND)?;

    if !Project::delete_for_owner(&state.db, id, auth.user_id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::debug!(project_id = %id, user_id = %auth.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
