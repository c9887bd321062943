use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DocumentRef, EngagementId, InvitationId, ParticipantId};

/// A participant's answer to an invitation.
///
/// Only ever moves out of `NotResponded`, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    NotResponded,
    Accepted,
    Excused,
}

/// Administrative judgment on a submitted excuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excuse {
    pub reason: String,
    pub document_ref: Option<DocumentRef>,
    pub review_status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub engagement_id: EngagementId,
    pub participant_id: ParticipantId,
    pub response_status: ResponseStatus,
    /// Present only when `response_status` is `Excused`.
    pub excuse: Option<Excuse>,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn new(
        engagement_id: EngagementId,
        participant_id: ParticipantId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: InvitationId::new(),
            engagement_id,
            participant_id,
            response_status: ResponseStatus::NotResponded,
            excuse: None,
            invited_at: now,
            responded_at: None,
        }
    }
}

/// Invitations of one engagement split by response, for reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvitationBreakdown {
    pub accepted: Vec<Invitation>,
    pub excused: Vec<Invitation>,
    pub not_responded: Vec<Invitation>,
}

impl InvitationBreakdown {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.excused.len() + self.not_responded.len()
    }
}
