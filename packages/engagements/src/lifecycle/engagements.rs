//! Engagement entity operations: create, publish, cancel, template, edits.

use chrono::{DateTime, Utc};

use crate::error::{EngagementError, Result};
use crate::types::{
    Engagement, EngagementDetails, EngagementId, EngagementPatch, EngagementState,
    EngagementStatus, ResponseStatus, TemplateId,
};

/// Build a new Draft engagement from admin-supplied metadata.
pub fn create(details: EngagementDetails, now: DateTime<Utc>) -> Result<EngagementState> {
    let title = validate_title(&details.title)?;
    validate_capacity(details.capacity)?;

    Ok(EngagementState::new(Engagement {
        id: EngagementId::new(),
        title,
        kind: details.kind,
        scheduled_at: details.scheduled_at,
        location: details.location.trim().to_string(),
        content_type: details.content_type.trim().to_string(),
        capacity: details.capacity,
        template_id: details.template_id,
        published_at: None,
        cancelled_at: None,
        attendance_confirmed: false,
        certificates_issued: false,
        created_at: now,
        updated_at: now,
    }))
}

/// Draft → Upcoming. Needs a scheduled date strictly in the future.
pub fn publish(state: &mut EngagementState, now: DateTime<Utc>) -> Result<()> {
    state.ensure_not_cancelled()?;
    let engagement = &state.engagement;

    if !engagement.is_draft() {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} is already published",
            engagement.id
        )));
    }
    match engagement.scheduled_at {
        None => {
            return Err(EngagementError::invalid_state(
                "cannot publish without a scheduled date",
            ))
        }
        Some(at) if at <= now => {
            return Err(EngagementError::invalid_state(format!(
                "cannot publish: scheduled date {} is not in the future",
                at
            )))
        }
        Some(_) => {}
    }

    state.engagement.published_at = Some(now);
    state.engagement.updated_at = now;
    Ok(())
}

/// Any non-completed engagement → Cancelled. Terminal.
///
/// An engagement whose certificates were already issued also counts as
/// finished and cannot be cancelled.
pub fn cancel(state: &mut EngagementState, now: DateTime<Utc>) -> Result<()> {
    state.ensure_not_cancelled()?;
    let engagement = &state.engagement;

    if engagement.status(now) == EngagementStatus::Completed {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} is completed",
            engagement.id
        )));
    }
    if engagement.certificates_issued {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} has already issued certificates",
            engagement.id
        )));
    }

    state.engagement.cancelled_at = Some(now);
    state.engagement.updated_at = now;
    Ok(())
}

/// Set or replace the certificate template, until certificates are issued.
pub fn set_template(
    state: &mut EngagementState,
    template_id: TemplateId,
    now: DateTime<Utc>,
) -> Result<()> {
    state.ensure_not_cancelled()?;
    if state.engagement.certificates_issued {
        return Err(EngagementError::invalid_state(
            "certificate template cannot change after certificates are issued",
        ));
    }

    state.engagement.template_id = Some(template_id);
    state.engagement.updated_at = now;
    Ok(())
}

/// Edit descriptive fields while the engagement is Draft or Upcoming.
pub fn update_details(
    state: &mut EngagementState,
    patch: EngagementPatch,
    now: DateTime<Utc>,
) -> Result<()> {
    state.ensure_not_cancelled()?;
    let engagement = &state.engagement;

    let status = engagement.status(now);
    if !matches!(status, EngagementStatus::Draft | EngagementStatus::Upcoming)
        || engagement.attendance_confirmed
    {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} can no longer be edited",
            engagement.id
        )));
    }

    let title = patch.title.as_deref().map(validate_title).transpose()?;

    if let Some(at) = patch.scheduled_at {
        if !engagement.is_draft() && at <= now {
            return Err(EngagementError::invalid_argument(
                "a published engagement must stay scheduled in the future",
            ));
        }
    }

    if let Some(capacity) = patch.capacity {
        validate_capacity(capacity)?;
        let accepted = state
            .invitations
            .iter()
            .filter(|i| i.response_status == ResponseStatus::Accepted)
            .count();
        if capacity.is_some_and(|c| (c as usize) < accepted) {
            return Err(EngagementError::invalid_argument(format!(
                "capacity cannot drop below the {} accepted participants",
                accepted
            )));
        }
    }

    let engagement = &mut state.engagement;
    if let Some(title) = title {
        engagement.title = title;
    }
    if let Some(at) = patch.scheduled_at {
        engagement.scheduled_at = Some(at);
    }
    if let Some(location) = patch.location {
        engagement.location = location.trim().to_string();
    }
    if let Some(content_type) = patch.content_type {
        engagement.content_type = content_type.trim().to_string();
    }
    if let Some(capacity) = patch.capacity {
        engagement.capacity = capacity;
    }
    engagement.updated_at = now;
    Ok(())
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(EngagementError::invalid_argument("title must not be empty"));
    }
    Ok(title.to_string())
}

fn validate_capacity(capacity: Option<u32>) -> Result<()> {
    if capacity == Some(0) {
        return Err(EngagementError::invalid_argument(
            "capacity must be at least 1 when set",
        ));
    }
    Ok(())
}
