//! Participant directory trait (read-only, owned outside this crate).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ParticipantFilter, ParticipantId, ParticipantProfile};

#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Ids of every participant matching `filter`.
    async fn query(&self, filter: &ParticipantFilter) -> Result<Vec<ParticipantId>>;

    /// Profile of one participant, if known.
    async fn get(&self, id: ParticipantId) -> Result<Option<ParticipantProfile>>;
}
