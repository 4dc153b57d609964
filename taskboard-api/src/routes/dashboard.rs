/// Dashboard summary endpoint
///
/// ```text
/// GET /api/dashboard/summary
/// Authorization: Bearer <jwt_token>
/// ```

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;
use taskboard_shared::{auth::middleware::AuthContext, models::dashboard::DashboardSummary};

use crate::{app::AppState, error::ApiResult};

/// Summary counts as returned to clients
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub projects: i64,
    pub tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    pub upcoming_tasks: i64,
}

impl From<DashboardSummary> for SummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            projects: summary.projects,
            tasks: summary.tasks,
            completed_tasks: summary.completed_tasks,
            in_progress_tasks: summary.in_progress_tasks,
            upcoming_tasks: summary.upcoming_tasks,
        }
    }
}

/// Counts for the caller; "upcoming" is judged against today's UTC date
pub async fn summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<SummaryResponse>> {
    let today = Utc::now().date_naive();
    let summary = DashboardSummary::for_owner(&state.db, auth.user_id, today).await?;

    Ok(Json(summary.into()))
}
