//! Data model for the engagement lifecycle.

pub mod attendance;
pub mod certificate;
pub mod engagement;
pub mod ids;
pub mod invitation;
pub mod participant;
pub mod state;

pub use attendance::{AttendanceRecord, AttendanceSummary};
pub use certificate::Certificate;
pub use engagement::{
    Engagement, EngagementDetails, EngagementKind, EngagementPatch, EngagementStatus,
    EngagementView,
};
pub use ids::{
    CertificateId, DocumentRef, EngagementId, InvitationId, ParticipantId, TemplateId,
};
pub use invitation::{Excuse, Invitation, InvitationBreakdown, ResponseStatus, ReviewStatus};
pub use participant::{ParticipantFilter, ParticipantProfile};
pub use state::EngagementState;
