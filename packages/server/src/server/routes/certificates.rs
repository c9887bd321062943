use axum::{extract::Extension, http::StatusCode, Json};
use engagements::{Certificate, EngagementId, ParticipantId};

use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::AppPath;

pub async fn generate(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<(StatusCode, Json<Vec<Certificate>>)> {
    let batch = state.workflow.generate_certificates(id).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

pub async fn list_certificates(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<Vec<Certificate>>> {
    Ok(Json(state.workflow.list_certificates(id).await?))
}

pub async fn get_certificate(
    Extension(state): Extension<AppState>,
    AppPath((id, participant_id)): AppPath<(EngagementId, ParticipantId)>,
) -> ApiResult<Json<Certificate>> {
    Ok(Json(state.workflow.get_certificate(id, participant_id).await?))
}

/// Attach documents to issued certificates that have none yet.
pub async fn render(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<Vec<Certificate>>> {
    Ok(Json(state.workflow.render_certificates(id).await?))
}
