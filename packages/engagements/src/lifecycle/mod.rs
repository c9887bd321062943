//! Lifecycle components.
//!
//! Each component is a set of functions over a single [`EngagementState`]
//! that validate first and only then write, so a returned error never leaves a
//! half-applied change behind. Locking and persistence are the caller's job
//! (see [`crate::workflow::EngagementWorkflow`]).
//!
//! - [`engagements`] - create, publish, cancel, template and detail edits
//! - [`invitations`] - the invitation registry and participant responses
//! - [`excuses`] - excuse review
//! - [`attendance`] - the attendance ledger and its one-way lock
//! - [`certificates`] - one-shot certificate issuance
//!
//! [`EngagementState`]: crate::types::EngagementState

pub mod attendance;
pub mod certificates;
pub mod engagements;
pub mod excuses;
pub mod invitations;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::BTreeSet;

    use crate::types::{
        EngagementDetails, EngagementKind, EngagementState, InvitationId, ParticipantId,
        TemplateId,
    };

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    pub fn details() -> EngagementDetails {
        EngagementDetails {
            title: "Leadership summit".into(),
            kind: EngagementKind::Program,
            scheduled_at: Some(now() + Duration::days(7)),
            location: "Main hall".into(),
            content_type: "workshop".into(),
            capacity: None,
            template_id: Some(TemplateId::new("summit-2026").unwrap()),
        }
    }

    pub fn draft() -> EngagementState {
        super::engagements::create(details(), now()).unwrap()
    }

    pub fn published() -> EngagementState {
        let mut state = draft();
        super::engagements::publish(&mut state, now()).unwrap();
        state
    }

    /// Published engagement with one fresh invitation; returns its id.
    pub fn with_invitation() -> (EngagementState, InvitationId) {
        let mut state = published();
        let participants = BTreeSet::from([ParticipantId::new()]);
        super::invitations::invite(&mut state, &participants, now()).unwrap();
        let id = state.invitations[0].id;
        (state, id)
    }

    /// Published engagement with one accepted invitation; returns its id.
    pub fn with_accepted() -> (EngagementState, InvitationId) {
        let (mut state, id) = with_invitation();
        super::invitations::respond_accept(&mut state, id, now()).unwrap();
        (state, id)
    }
}
