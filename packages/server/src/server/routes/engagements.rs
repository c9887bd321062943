//! Engagement admin routes: create, read, edit, publish, cancel, template.

use axum::{extract::Extension, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use engagements::{
    EngagementDetails, EngagementId, EngagementKind, EngagementPatch, EngagementView, TemplateId,
};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::{AppJson, AppPath};

#[derive(Debug, Deserialize)]
pub struct CreateEngagementRequest {
    pub title: String,
    pub kind: EngagementKind,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub template_id: Option<String>,
}

impl CreateEngagementRequest {
    fn into_details(self) -> engagements::Result<EngagementDetails> {
        Ok(EngagementDetails {
            title: self.title,
            kind: self.kind,
            scheduled_at: self.scheduled_at,
            location: self.location,
            content_type: self.content_type,
            capacity: self.capacity,
            template_id: self.template_id.map(TemplateId::new).transpose()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SetTemplateRequest {
    pub template_id: String,
}

pub async fn create_engagement(
    Extension(state): Extension<AppState>,
    AppJson(body): AppJson<CreateEngagementRequest>,
) -> ApiResult<(StatusCode, Json<EngagementView>)> {
    let view = state.workflow.create_engagement(body.into_details()?).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn list_engagements(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<EngagementView>>> {
    Ok(Json(state.workflow.list_engagements().await?))
}

pub async fn get_engagement(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<EngagementView>> {
    Ok(Json(state.workflow.get_engagement(id).await?))
}

pub async fn update_engagement(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
    AppJson(patch): AppJson<EngagementPatch>,
) -> ApiResult<Json<EngagementView>> {
    Ok(Json(state.workflow.update_details(id, patch).await?))
}

pub async fn publish(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<EngagementView>> {
    Ok(Json(state.workflow.publish(id).await?))
}

pub async fn cancel(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
) -> ApiResult<Json<EngagementView>> {
    Ok(Json(state.workflow.cancel(id).await?))
}

pub async fn set_template(
    Extension(state): Extension<AppState>,
    AppPath(id): AppPath<EngagementId>,
    AppJson(body): AppJson<SetTemplateRequest>,
) -> ApiResult<Json<EngagementView>> {
    let template_id = TemplateId::new(body.template_id)?;
    Ok(Json(state.workflow.set_template(id, template_id).await?))
}
