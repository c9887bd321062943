//! Typed ids and opaque references for engagement entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngagementError, Result};
pub use crate::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Engagement entities (programs and opportunities).
pub struct EngagementEntity;

/// Marker type for Invitation entities.
pub struct InvitationEntity;

/// Marker type for participants resolved through the participant directory.
pub struct ParticipantEntity;

/// Marker type for Certificate entities.
pub struct CertificateEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type EngagementId = Id<EngagementEntity>;

pub type InvitationId = Id<InvitationEntity>;

pub type ParticipantId = Id<ParticipantEntity>;

pub type CertificateId = Id<CertificateEntity>;

// ============================================================================
// Opaque references
// ============================================================================

/// Reference to a certificate template held by the rendering service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    /// Builds a template reference, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EngagementError::invalid_argument(
                "template id must not be empty",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a stored blob (uploaded excuse document, rendered certificate).
///
/// The lifecycle never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EngagementError::invalid_argument(
                "document reference must not be empty",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
