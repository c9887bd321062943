//! Testing utilities: a controllable clock and a recording renderer.
//!
//! Useful for driving [`crate::EngagementWorkflow`] deterministically without
//! a real rendering service.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::error::{EngagementError, Result};
use crate::traits::{CertificateRenderer, Clock};
use crate::types::{DocumentRef, Engagement, ParticipantId, ParticipantProfile, TemplateId};

/// A clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.write().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

/// Record of a call made to the mock renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub template_id: TemplateId,
    pub participant_id: ParticipantId,
    pub engagement_title: String,
}

/// Renderer that returns `mock://<template>/<participant>` and records calls.
#[derive(Clone, Default)]
pub struct MockRenderer {
    calls: Arc<RwLock<Vec<RenderCall>>>,
    fail: Arc<RwLock<bool>>,
    fail_for: Arc<RwLock<HashSet<ParticipantId>>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent render fail. `false` also clears [`Self::fail_for`].
    pub fn fail_renders(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
        if !fail {
            self.fail_for.write().unwrap().clear();
        }
    }

    /// Make renders for one participant fail.
    pub fn fail_for(&self, participant_id: ParticipantId) {
        self.fail_for.write().unwrap().insert(participant_id);
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl CertificateRenderer for MockRenderer {
    async fn render(
        &self,
        template_id: &TemplateId,
        participant: &ParticipantProfile,
        engagement: &Engagement,
    ) -> Result<DocumentRef> {
        let failing = *self.fail.read().unwrap()
            || self.fail_for.read().unwrap().contains(&participant.id);
        if failing {
            return Err(EngagementError::Storage("mock renderer failure".into()));
        }
        self.calls.write().unwrap().push(RenderCall {
            template_id: template_id.clone(),
            participant_id: participant.id,
            engagement_title: engagement.title.clone(),
        });
        DocumentRef::new(format!("mock://{}/{}", template_id, participant.id))
    }
}

/// Minimal profile for tests that only care about the id.
pub fn participant(name: &str) -> ParticipantProfile {
    ParticipantProfile {
        id: ParticipantId::new(),
        name: name.to_string(),
        country: None,
        university: None,
        scholarship: None,
        specialization: None,
    }
}
