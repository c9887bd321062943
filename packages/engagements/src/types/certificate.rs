use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CertificateId, DocumentRef, EngagementId, ParticipantId, TemplateId};

/// Proof of attendance for one participant of one engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub engagement_id: EngagementId,
    pub participant_id: ParticipantId,
    pub template_id: TemplateId,
    pub issued_at: DateTime<Utc>,
    /// Set once the renderer has produced the document.
    pub document_ref: Option<DocumentRef>,
}
