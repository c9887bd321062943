//! Excuse review.
//!
//! Review records the administrative judgment only. The invitation stays
//! Excused either way, and the outcome has no effect on attendance or
//! certificate eligibility.

use chrono::{DateTime, Utc};

use crate::error::{EngagementError, Result};
use crate::types::{EngagementState, InvitationId, ReviewStatus};

pub fn approve_excuse(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    now: DateTime<Utc>,
) -> Result<()> {
    review(state, invitation_id, ReviewStatus::Approved, now)
}

pub fn reject_excuse(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    now: DateTime<Utc>,
) -> Result<()> {
    review(state, invitation_id, ReviewStatus::Rejected, now)
}

fn review(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    outcome: ReviewStatus,
    now: DateTime<Utc>,
) -> Result<()> {
    state.ensure_not_cancelled()?;
    let invitation = state.invitation_mut(invitation_id)?;

    let excuse = match invitation.excuse.as_mut() {
        Some(excuse) if excuse.review_status == ReviewStatus::Pending => excuse,
        Some(excuse) => {
            return Err(EngagementError::invalid_state(format!(
                "excuse for invitation {} was already reviewed ({:?})",
                invitation_id, excuse.review_status
            )))
        }
        None => {
            return Err(EngagementError::invalid_state(format!(
                "invitation {} has no excuse to review",
                invitation_id
            )))
        }
    };

    excuse.review_status = outcome;
    excuse.reviewed_at = Some(now);
    Ok(())
}
