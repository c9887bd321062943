//! Invitation routes: targeting, participant responses, excuse review.

use axum::{extract::Extension, http::StatusCode, Json};
use engagements::{
    DocumentRef, EngagementId, Invitation, InvitationBreakdown, InvitationId, ParticipantFilter,
    ParticipantId,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::{AppJson, AppPath};

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub participant_ids: Vec<ParticipantId>,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub created: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExcuseRequest {
    pub reason: String,
    #[serde(default)]
    pub document_ref: Option<String>,
}

/// 201 when at least one invitation was created, 200 for a no-op re-invite.
fn invite_status(created: usize) -> StatusCode {
    if created == 0 {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    }
}

pub async fn invite(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
    AppJson(body): AppJson<InviteRequest>,
) -> ApiResult<(StatusCode, Json<InviteResponse>)> {
    let created = state.workflow.invite(id, body.participant_ids).await?;
    Ok((invite_status(created), Json(InviteResponse { created })))
}

pub async fn invite_matching(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
    AppJson(filter): AppJson<ParticipantFilter>,
) -> ApiResult<(StatusCode, Json<InviteResponse>)> {
    let created = state.workflow.invite_matching(id, &filter).await?;
    Ok((invite_status(created), Json(InviteResponse { created })))
}

pub async fn list_invitations(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<InvitationBreakdown>> {
    Ok(Json(state.workflow.list_invitations(id).await?))
}

pub async fn get_invitation(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
) -> ApiResult<Json<Invitation>> {
    Ok(Json(state.workflow.get_invitation(id).await?))
}

pub async fn accept(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
) -> ApiResult<Json<Invitation>> {
    Ok(Json(state.workflow.respond_accept(id).await?))
}

pub async fn excuse(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
    AppJson(body): AppJson<ExcuseRequest>,
) -> ApiResult<Json<Invitation>> {
    let document_ref = body.document_ref.map(DocumentRef::new).transpose()?;
    Ok(Json(
        state
            .workflow
            .respond_excuse(id, body.reason, document_ref)
            .await?,
    ))
}

pub async fn approve_excuse(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
) -> ApiResult<Json<Invitation>> {
    Ok(Json(state.workflow.approve_excuse(id).await?))
}

pub async fn reject_excuse(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<InvitationId>,
) -> ApiResult<Json<Invitation>> {
    Ok(Json(state.workflow.reject_excuse(id).await?))
}
