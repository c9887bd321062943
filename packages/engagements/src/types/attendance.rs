use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{InvitationId, ParticipantId};

/// Attendance mark for one accepted invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub invitation_id: InvitationId,
    pub participant_id: ParticipantId,
    pub attended: bool,
    pub marked_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn new(invitation_id: InvitationId, participant_id: ParticipantId) -> Self {
        Self {
            invitation_id,
            participant_id,
            attended: false,
            marked_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub accepted: usize,
    pub attended: usize,
    pub absent: usize,
    pub confirmed: bool,
}
