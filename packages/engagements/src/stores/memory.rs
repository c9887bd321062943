//! In-memory storage implementation.
//!
//! Each engagement sits behind its own mutex, so work on one engagement never
//! waits on another. Data is lost on restart; use `PostgresStore` when that
//! matters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

use crate::error::{EngagementError, Result};
use crate::traits::store::{ApplyFn, EngagementStore};
use crate::types::{Engagement, EngagementId, EngagementState, InvitationId};

type Slot = Arc<Mutex<EngagementState>>;

#[derive(Default)]
pub struct MemoryStore {
    engagements: RwLock<HashMap<EngagementId, Slot>>,
    invitation_index: RwLock<HashMap<InvitationId, EngagementId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: EngagementId) -> Result<Option<Slot>> {
        let map = self.engagements.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn index(&self, engagement_id: EngagementId, invitations: &[InvitationId]) -> Result<()> {
        if invitations.is_empty() {
            return Ok(());
        }
        let mut index = self.invitation_index.write().map_err(|_| poisoned())?;
        for id in invitations {
            index.insert(*id, engagement_id);
        }
        Ok(())
    }
}

fn poisoned() -> EngagementError {
    EngagementError::storage("memory store lock poisoned")
}

#[async_trait]
impl EngagementStore for MemoryStore {
    async fn insert(&self, state: &EngagementState) -> Result<()> {
        let id = state.engagement.id;
        {
            let mut map = self.engagements.write().map_err(|_| poisoned())?;
            if map.contains_key(&id) {
                return Err(EngagementError::storage(format!(
                    "engagement {} already stored",
                    id
                )));
            }
            map.insert(id, Arc::new(Mutex::new(state.clone())));
        }
        let invitations: Vec<InvitationId> = state.invitations.iter().map(|i| i.id).collect();
        self.index(id, &invitations)?;
        debug!(engagement_id = %id, "Stored engagement");
        Ok(())
    }

    async fn load(&self, id: EngagementId) -> Result<Option<EngagementState>> {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let state = slot.lock().map_err(|_| poisoned())?;
        Ok(Some(state.clone()))
    }

    async fn list(&self) -> Result<Vec<Engagement>> {
        let slots: Vec<Slot> = {
            let map = self.engagements.read().map_err(|_| poisoned())?;
            map.values().cloned().collect()
        };

        let mut engagements = Vec::with_capacity(slots.len());
        for slot in slots {
            let state = slot.lock().map_err(|_| poisoned())?;
            engagements.push(state.engagement.clone());
        }
        engagements.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(engagements)
    }

    async fn locate_invitation(&self, id: InvitationId) -> Result<Option<EngagementId>> {
        let index = self.invitation_index.read().map_err(|_| poisoned())?;
        Ok(index.get(&id).copied())
    }

    async fn update(&self, id: EngagementId, apply: &mut ApplyFn<'_>) -> Result<()> {
        let slot = self
            .slot(id)?
            .ok_or_else(|| EngagementError::not_found("engagement", id))?;

        let mut current = slot.lock().map_err(|_| poisoned())?;
        let mut draft = current.clone();
        apply(&mut draft)?;

        // Invitations are append-only, so anything past the old length is new.
        let added: Vec<InvitationId> = draft.invitations[current.invitations.len()..]
            .iter()
            .map(|i| i.id)
            .collect();
        self.index(id, &added)?;

        *current = draft;
        debug!(engagement_id = %id, new_invitations = added.len(), "Committed engagement update");
        Ok(())
    }
}
