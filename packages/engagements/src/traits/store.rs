//! Storage trait for engagement aggregates.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Engagement, EngagementId, EngagementState, InvitationId};

/// Mutation applied to a draft copy of an aggregate inside [`EngagementStore::update`].
pub type ApplyFn<'a> = dyn FnMut(&mut EngagementState) -> Result<()> + Send + 'a;

/// Persistence for engagement aggregates.
///
/// `update` is the only way to change a stored aggregate and must serialize
/// all updates to the same engagement: the closure runs while the
/// engagement's lock is held, against a draft that is committed only when the
/// closure returns `Ok`. Updates to different engagements must not contend.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Store a newly created aggregate.
    async fn insert(&self, state: &EngagementState) -> Result<()>;

    /// Snapshot of one aggregate.
    async fn load(&self, id: EngagementId) -> Result<Option<EngagementState>>;

    /// All engagements, newest first.
    async fn list(&self) -> Result<Vec<Engagement>>;

    /// Which engagement owns an invitation.
    async fn locate_invitation(&self, id: InvitationId) -> Result<Option<EngagementId>>;

    /// Run `apply` against the aggregate under its lock and commit on success.
    ///
    /// Fails with `NotFound` when the engagement does not exist. Errors from
    /// `apply` are returned as-is and leave the stored aggregate unchanged.
    async fn update(&self, id: EngagementId, apply: &mut ApplyFn<'_>) -> Result<()>;
}
