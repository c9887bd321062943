use axum::{extract::Extension, Json};
use engagements::{AttendanceRecord, AttendanceSummary, EngagementId, InvitationId};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::{AppJson, AppPath};

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub attended: bool,
}

pub async fn mark_attended(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
    AppJson(body): AppJson<MarkAttendanceRequest>,
) -> ApiResult<Json<AttendanceRecord>> {
    Ok(Json(state.workflow.mark_attended(id, body.attended).await?))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<AttendanceSummary>> {
    Ok(Json(state.workflow.attendance_summary(id).await?))
}

/// Lock attendance. Confirming twice returns the same summary.
pub async fn confirm(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<AttendanceSummary>> {
    Ok(Json(state.workflow.confirm_attendance(id).await?))
}
