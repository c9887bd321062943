//! Attendance ledger.
//!
//! Marks are freely editable until `confirm_attendance`, after which they are
//! frozen for good. Certificate issuance reads the frozen marks.

use chrono::{DateTime, Utc};

use crate::error::{EngagementError, Result};
use crate::types::{AttendanceSummary, EngagementState, InvitationId, ResponseStatus};

/// Set the attended flag of an accepted invitation. Idempotent.
pub fn mark_attended(
    state: &mut EngagementState,
    invitation_id: InvitationId,
    attended: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    state.ensure_not_cancelled()?;
    let response_status = state.invitation(invitation_id)?.response_status;

    if state.engagement.attendance_confirmed {
        return Err(EngagementError::Locked {
            engagement_id: state.engagement.id,
        });
    }
    if response_status != ResponseStatus::Accepted {
        return Err(EngagementError::invalid_state(format!(
            "invitation {} was not accepted ({:?})",
            invitation_id, response_status
        )));
    }

    let record = state
        .attendance
        .iter_mut()
        .find(|r| r.invitation_id == invitation_id)
        .ok_or_else(|| EngagementError::not_found("attendance record", invitation_id))?;
    record.attended = attended;
    record.marked_at = Some(now);
    Ok(())
}

/// Lock attendance. Returns `false` if it was already locked.
pub fn confirm_attendance(state: &mut EngagementState, now: DateTime<Utc>) -> Result<bool> {
    state.ensure_not_cancelled()?;
    if state.engagement.is_draft() {
        return Err(EngagementError::invalid_state(format!(
            "engagement {} is not published yet",
            state.engagement.id
        )));
    }
    if state.engagement.attendance_confirmed {
        return Ok(false);
    }

    state.engagement.attendance_confirmed = true;
    state.engagement.updated_at = now;
    Ok(true)
}

pub fn summary(state: &EngagementState) -> AttendanceSummary {
    let accepted = state.attendance.len();
    let attended = state.attendance.iter().filter(|r| r.attended).count();
    AttendanceSummary {
        accepted,
        attended,
        absent: accepted - attended,
        confirmed: state.engagement.attendance_confirmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lifecycle::fixtures::{self, now};
    use crate::lifecycle::invitations::respond_excuse;

    #[test]
    fn marks_toggle_until_confirmed() {
        let (mut state, id) = fixtures::with_accepted();
        mark_attended(&mut state, id, true, now()).unwrap();
        mark_attended(&mut state, id, true, now()).unwrap();
        mark_attended(&mut state, id, false, now()).unwrap();
        assert!(!state.attendance_for(id).unwrap().attended);
    }

    #[test]
    fn confirmed_attendance_is_locked() {
        let (mut state, id) = fixtures::with_accepted();
        mark_attended(&mut state, id, true, now()).unwrap();
        assert!(confirm_attendance(&mut state, now()).unwrap());

        let err = mark_attended(&mut state, id, false, now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Locked);
        assert!(state.attendance_for(id).unwrap().attended);
    }

    #[test]
    fn confirming_twice_is_a_noop() {
        let mut state = fixtures::published();
        assert!(confirm_attendance(&mut state, now()).unwrap());
        assert!(!confirm_attendance(&mut state, now()).unwrap());
        assert!(state.engagement.attendance_confirmed);
    }

    #[test]
    fn draft_attendance_cannot_be_confirmed() {
        let mut state = fixtures::draft();
        assert_eq!(
            confirm_attendance(&mut state, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn only_accepted_invitations_can_be_marked() {
        let (mut state, id) = fixtures::with_invitation();
        assert_eq!(
            mark_attended(&mut state, id, true, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );

        respond_excuse(&mut state, id, "exam", None, now()).unwrap();
        assert_eq!(
            mark_attended(&mut state, id, true, now()).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn lock_wins_over_response_checks() {
        let (mut state, id) = fixtures::with_invitation();
        confirm_attendance(&mut state, now()).unwrap();
        assert_eq!(
            mark_attended(&mut state, id, true, now()).unwrap_err().kind(),
            ErrorKind::Locked
        );
    }

    #[test]
    fn summary_counts_marks() {
        let (mut state, id) = fixtures::with_accepted();
        mark_attended(&mut state, id, true, now()).unwrap();
        let s = summary(&state);
        assert_eq!((s.accepted, s.attended, s.absent, s.confirmed), (1, 1, 0, false));
    }
}
