//! The engagement aggregate: one engagement and everything it owns.
//!
//! Storage backends persist and lock an `EngagementState` as a unit, which is
//! what serializes invitation, attendance and certificate changes for the
//! same engagement.

use serde::{Deserialize, Serialize};

use super::attendance::AttendanceRecord;
use super::certificate::Certificate;
use super::engagement::Engagement;
use super::ids::{InvitationId, ParticipantId};
use super::invitation::Invitation;
use crate::error::{EngagementError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementState {
    pub engagement: Engagement,
    /// Append-only, in invitation order.
    pub invitations: Vec<Invitation>,
    pub attendance: Vec<AttendanceRecord>,
    pub certificates: Vec<Certificate>,
}

impl EngagementState {
    pub fn new(engagement: Engagement) -> Self {
        Self {
            engagement,
            invitations: Vec::new(),
            attendance: Vec::new(),
            certificates: Vec::new(),
        }
    }

    pub fn invitation(&self, id: InvitationId) -> Result<&Invitation> {
        self.invitations
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| EngagementError::not_found("invitation", id))
    }

    pub fn invitation_mut(&mut self, id: InvitationId) -> Result<&mut Invitation> {
        self.invitations
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| EngagementError::not_found("invitation", id))
    }

    pub fn invitation_for(&self, participant_id: ParticipantId) -> Option<&Invitation> {
        self.invitations
            .iter()
            .find(|i| i.participant_id == participant_id)
    }

    pub fn attendance_for(&self, invitation_id: InvitationId) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|r| r.invitation_id == invitation_id)
    }

    /// Fails with `InvalidState` once the engagement is cancelled. Every
    /// mutating lifecycle operation starts here.
    pub fn ensure_not_cancelled(&self) -> Result<()> {
        if self.engagement.is_cancelled() {
            return Err(EngagementError::invalid_state(format!(
                "engagement {} is cancelled",
                self.engagement.id
            )));
        }
        Ok(())
    }
}
