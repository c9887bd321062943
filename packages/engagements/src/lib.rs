//! Engagement Lifecycle
//!
//! Programs and volunteering opportunities share one lifecycle: an admin
//! creates and publishes an engagement, invites participants, participants
//! accept or excuse themselves, excuses are reviewed, attendance is marked and
//! then locked, and certificates are issued to everyone who attended.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use engagements::{EngagementWorkflow, MemoryStore, StaticDirectory};
//!
//! let workflow = EngagementWorkflow::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(StaticDirectory::from_json_file("participants.json")?),
//!     Arc::new(my_renderer),
//! );
//!
//! let engagement = workflow.create_engagement(details).await?;
//! workflow.publish(engagement.engagement.id).await?;
//! workflow.invite(engagement.engagement.id, participant_ids).await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Engagements, invitations, attendance records, certificates
//! - [`lifecycle`] - Validate-then-apply operations over one aggregate
//! - [`workflow`] - The orchestrator callers talk to
//! - [`traits`] - Storage, participant directory, renderer and clock seams
//! - [`stores`] - Storage implementations (MemoryStore, PostgresStore)
//! - [`testing`] - Manual clock and mock renderer

pub mod directory;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod workflow;

pub use directory::StaticDirectory;
pub use error::{EngagementError, ErrorKind, Result};
pub use traits::{
    ApplyFn, CertificateRenderer, Clock, EngagementStore, ParticipantDirectory, SystemClock,
};
pub use types::{
    AttendanceRecord, AttendanceSummary, Certificate, CertificateId, DocumentRef, Engagement,
    EngagementDetails, EngagementId, EngagementKind, EngagementPatch, EngagementState,
    EngagementStatus, EngagementView, Excuse, Invitation, InvitationBreakdown, InvitationId,
    ParticipantFilter, ParticipantId, ParticipantProfile, ResponseStatus, ReviewStatus,
    TemplateId,
};
pub use workflow::EngagementWorkflow;

pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
