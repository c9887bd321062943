//! Typed errors for the engagement lifecycle.
//!
//! Every lifecycle operation validates against the current aggregate before
//! writing anything, so an error always means nothing was changed.

use thiserror::Error;

use crate::types::{EngagementId, InvitationId};

/// Errors returned by engagement lifecycle operations.
#[derive(Debug, Error)]
pub enum EngagementError {
    /// Malformed or missing input (empty excuse reason, blank title, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not valid for the engagement's current lifecycle position
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The invitation already carries an accept or excuse response
    #[error("invitation {invitation_id} has already been responded to")]
    AlreadyResponded { invitation_id: InvitationId },

    /// Attendance for the engagement is confirmed and can no longer change
    #[error("attendance for engagement {engagement_id} is confirmed and locked")]
    Locked { engagement_id: EngagementId },

    /// Unknown engagement, invitation, participant or certificate
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Storage backend failure
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Fieldless classification of [`EngagementError`], used by transports to
/// pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    AlreadyResponded,
    Locked,
    NotFound,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::AlreadyResponded => "already_responded",
            ErrorKind::Locked => "locked",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Storage => "storage",
        }
    }
}

impl EngagementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngagementError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            EngagementError::InvalidState(_) => ErrorKind::InvalidState,
            EngagementError::AlreadyResponded { .. } => ErrorKind::AlreadyResponded,
            EngagementError::Locked { .. } => ErrorKind::Locked,
            EngagementError::NotFound { .. } => ErrorKind::NotFound,
            EngagementError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        EngagementError::InvalidArgument(reason.into())
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        EngagementError::InvalidState(reason.into())
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngagementError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn storage(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        EngagementError::Storage(reason.into())
    }
}

impl From<serde_json::Error> for EngagementError {
    fn from(err: serde_json::Error) -> Self {
        EngagementError::Storage(Box::new(err))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for EngagementError {
    fn from(err: sqlx::Error) -> Self {
        EngagementError::Storage(Box::new(err))
    }
}

/// Result type alias for engagement operations.
pub type Result<T> = std::result::Result<T, EngagementError>;
