/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `projects`: Project CRUD
/// - `tasks`: Task CRUD
/// - `dashboard`: Per-user summary counts

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::extract::{rejection::PathRejection, Path};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Extracts a resource id from the path
///
/// An id that is not a UUID cannot name any row, so it is a 404 like any
/// other unknown id.
pub(crate) fn resource_id(
    path: Result<Path<Uuid>, PathRejection>,
    not_found: &str,
) -> ApiResult<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(not_found.to_string()))
}
