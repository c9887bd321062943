//! Invitation registry: issuing invitations and recording responses.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};

use crate::error::{EngagementError, Result};
use crate::types::{
    AttendanceRecord, DocumentRef, EngagementState, Excuse, Invitation, InvitationBreakdown,
    InvitationId, ParticipantId, ResponseStatus, ReviewStatus,
};

/// Invite participants, skipping anyone already invited.
///
/// Returns how many invitations were created. Re-inviting is a no-op, not an
/// error.
pub fn invite(
    state: &mut EngagementState,
    participants: &BTreeSet<ParticipantId>,
    now: DateTime<Utc>,
) -> Result<usize> {
    state.ensure_not_cancelled()?;
    if state.engagement.attendance_confirmed {
        return Err(EngagementError::invalid_state(
            "cannot invite after attendance has been confirmed",
        ));
    }

    let already_invited: HashSet<ParticipantId> =
        state.invitations.iter().map(|i| i.participant_id).collect();
    let engagement_id = state.engagement.id;

    let fresh: Vec<Invitation> = participants
        .iter()
        .filter(|p| !already_invited.contains(p))
        .map(|p| Invitation::new(engagement_id, *p, now))
        .collect();

    let created = fresh.len();
    state.invitations.extend(fresh);
    if created > 0 {
        state.engagement.updated_at = now;
    }
    Ok(created)
}

/// NotResponded → Accepted, opening an attendance record.
pub fn respond_accept(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    now: DateTime<Utc>,
) -> Result<()> {
    ensure_responses_open(state)?;
    let invitation = state.invitation(invitation_id)?;
    ensure_not_responded(invitation)?;

    if let Some(capacity) = state.engagement.capacity {
        let accepted = count(state, ResponseStatus::Accepted);
        if accepted >= capacity as usize {
            return Err(EngagementError::invalid_state(format!(
                "engagement {} is at capacity ({})",
                state.engagement.id, capacity
            )));
        }
    }

    let participant_id = invitation.participant_id;
    let invitation = state.invitation_mut(invitation_id)?;
    invitation.response_status = ResponseStatus::Accepted;
    invitation.responded_at = Some(now);
    state
        .attendance
        .push(AttendanceRecord::new(invitation_id, participant_id));
    Ok(())
}

/// NotResponded → Excused, with the excuse pending review.
pub fn respond_excuse(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    reason: &str,
    document_ref: Option<DocumentRef>,
    now: DateTime<Utc>,
) -> Result<()> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(EngagementError::invalid_argument(
            "excuse reason must not be empty",
        ));
    }
    ensure_responses_open(state)?;
    ensure_not_responded(state.invitation(invitation_id)?)?;

    let invitation = state.invitation_mut(invitation_id)?;
    invitation.response_status = ResponseStatus::Excused;
    invitation.responded_at = Some(now);
    invitation.excuse = Some(Excuse {
        reason: reason.to_string(),
        document_ref,
        review_status: ReviewStatus::Pending,
        submitted_at: now,
        reviewed_at: None,
    });
    Ok(())
}

/// Split invitations into accepted, excused and not-yet-responded views.
pub fn breakdown(state: &EngagementState) -> InvitationBreakdown {
    let mut view = InvitationBreakdown::default();
    for invitation in &state.invitations {
        let bucket = match invitation.response_status {
            ResponseStatus::Accepted => &mut view.accepted,
            ResponseStatus::Excused => &mut view.excused,
            ResponseStatus::NotResponded => &mut view.not_responded,
        };
        bucket.push(invitation.clone());
    }
    view
}

fn count(state: &EngagementState, status: ResponseStatus) -> usize {
    state
        .invitations
        .iter()
        .filter(|i| i.response_status == status)
        .count()
}

fn ensure_responses_open(state: &EngagementState) -> Result<()> {
    state.ensure_not_cancelled()?;
    if state.engagement.is_draft() {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} is not published yet",
            state.engagement.id
        )));
    }
    if state.engagement.attendance_confirmed {
        return Err(EngagementError::invalid_state(
            "responses are closed: attendance has been confirmed",
        ));
    }
    Ok(())
}

fn ensure_not_responded(invitation: &Invitation) -> Result<()> {
    if invitation.response_status != ResponseStatus::NotResponded {
        return Err(EngagementError::AlreadyResponded {
            invitation_id: invitation.id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lifecycle::fixtures::{self, now};
    use crate::types::EngagementPatch;

    #[test]
    fn reinvite_is_a_noop() {
        let mut state = fixtures::published();
        let p = ParticipantId::new();
        let set = BTreeSet::from([p]);

        assert_eq!(invite(&mut state, &set, now()).unwrap(), 1);
        assert_eq!(invite(&mut state, &set, now()).unwrap(), 0);
        assert_eq!(state.invitations.len(), 1);
    }

    #[test]
    fn invite_only_counts_new_participants() {
        let (mut state, _) = fixtures::with_invitation();
        let existing = state.invitations[0].participant_id;
        let set = BTreeSet::from([existing, ParticipantId::new(), ParticipantId::new()]);
        assert_eq!(invite(&mut state, &set, now()).unwrap(), 2);
        assert_eq!(state.invitations.len(), 3);
    }

    #[test]
    fn draft_engagements_can_be_invited_to_but_not_answered() {
        let mut state = fixtures::draft();
        invite(&mut state, &BTreeSet::from([ParticipantId::new()]), now()).unwrap();
        let id = state.invitations[0].id;
        assert_eq!(
            respond_accept(&mut state, id, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn accept_opens_an_attendance_record() {
        let (state, id) = fixtures::with_accepted();
        let invitation = state.invitation(id).unwrap();
        assert_eq!(invitation.response_status, ResponseStatus::Accepted);

        let record = state.attendance_for(id).unwrap();
        assert!(!record.attended);
        assert_eq!(record.participant_id, invitation.participant_id);
    }

    #[test]
    fn second_response_is_already_responded() {
        let (mut state, id) = fixtures::with_accepted();
        assert_eq!(
            respond_accept(&mut state, id, now()).unwrap_err().kind(),
            ErrorKind::AlreadyResponded
        );
        assert_eq!(
            respond_excuse(&mut state, id, "sick", None, now())
                .unwrap_err()
                .kind(),
            ErrorKind::AlreadyResponded
        );
        assert_eq!(state.attendance.len(), 1);
    }

    #[test]
    fn excuse_needs_a_reason() {
        let (mut state, id) = fixtures::with_invitation();
        assert_eq!(
            respond_excuse(&mut state, id, "  ", None, now())
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            state.invitation(id).unwrap().response_status,
            ResponseStatus::NotResponded
        );
    }

    #[test]
    fn excuse_is_pending_review_and_has_no_attendance() {
        let (mut state, id) = fixtures::with_invitation();
        let doc = DocumentRef::new("blob://notes/123").unwrap();
        respond_excuse(&mut state, id, "medical", Some(doc.clone()), now()).unwrap();

        let invitation = state.invitation(id).unwrap();
        assert_eq!(invitation.response_status, ResponseStatus::Excused);
        let excuse = invitation.excuse.as_ref().unwrap();
        assert_eq!(excuse.reason, "medical");
        assert_eq!(excuse.review_status, ReviewStatus::Pending);
        assert_eq!(excuse.document_ref, Some(doc));
        assert!(state.attendance_for(id).is_none());
    }

    #[test]
    fn confirmed_attendance_closes_invitations_and_responses() {
        let (mut state, accepted) = fixtures::with_accepted();
        let set = BTreeSet::from([ParticipantId::new()]);
        invite(&mut state, &set, now()).unwrap();
        let pending = state
            .invitations
            .iter()
            .find(|i| i.id != accepted)
            .map(|i| i.id)
            .unwrap();
        crate::lifecycle::attendance::confirm_attendance(&mut state, now()).unwrap();
        let before = state.clone();

        let late = BTreeSet::from([ParticipantId::new()]);
        assert_eq!(
            invite(&mut state, &late, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            respond_accept(&mut state, pending, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            respond_excuse(&mut state, pending, "late notice", None, now())
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(state.attendance, before.attendance);
        assert_eq!(state, before);
    }

    #[test]
    fn accept_respects_capacity() {
        let mut state = fixtures::published();
        crate::lifecycle::engagements::update_details(
            &mut state,
            EngagementPatch {
                capacity: Some(Some(1)),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        let set = BTreeSet::from([ParticipantId::new(), ParticipantId::new()]);
        invite(&mut state, &set, now()).unwrap();
        let (first, second) = (state.invitations[0].id, state.invitations[1].id);

        respond_accept(&mut state, first, now()).unwrap();
        assert_eq!(
            respond_accept(&mut state, second, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        // Excusing is still possible when full
        respond_excuse(&mut state, second, "full anyway", None, now()).unwrap();
    }

    #[test]
    fn unknown_invitation_is_not_found() {
        let mut state = fixtures::published();
        assert_eq!(
            respond_accept(&mut state, InvitationId::new(), now())
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn breakdown_partitions_every_invitation_once() {
        let mut state = fixtures::published();
        let set: BTreeSet<_> = (0..4).map(|_| ParticipantId::new()).collect();
        invite(&mut state, &set, now()).unwrap();
        let ids: Vec<_> = state.invitations.iter().map(|i| i.id).collect();
        respond_accept(&mut state, ids[0], now()).unwrap();
        respond_excuse(&mut state, ids[1], "travel", None, now()).unwrap();

        let view = breakdown(&state);
        assert_eq!(view.accepted.len(), 1);
        assert_eq!(view.excused.len(), 1);
        assert_eq!(view.not_responded.len(), 2);
        assert_eq!(view.total(), state.invitations.len());
    }
}
