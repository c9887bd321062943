//! Shared fixtures for workflow integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use engagements::testing::{participant, ManualClock, MockRenderer};
use engagements::{
    EngagementDetails, EngagementId, EngagementKind, EngagementWorkflow, InvitationId,
    MemoryStore, ParticipantId, ParticipantProfile, StaticDirectory, TemplateId,
};

pub struct Harness {
    pub workflow: Arc<EngagementWorkflow>,
    pub clock: ManualClock,
    pub renderer: MockRenderer,
    pub directory: Arc<StaticDirectory>,
    pub people: Vec<ParticipantProfile>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
}

impl Harness {
    pub fn new(participants: usize) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let people: Vec<ParticipantProfile> = (0..participants)
            .map(|n| participant(&format!("Scholar {}", n)))
            .collect();
        let directory = Arc::new(StaticDirectory::new(people.clone()));
        let clock = ManualClock::new(start());
        let renderer = MockRenderer::new();

        let workflow = EngagementWorkflow::new(
            Arc::new(MemoryStore::new()),
            directory.clone(),
            Arc::new(renderer.clone()),
        )
        .with_clock(Arc::new(clock.clone()));

        Self {
            workflow: Arc::new(workflow),
            clock,
            renderer,
            directory,
            people,
        }
    }

    pub fn participant(&self, n: usize) -> ParticipantId {
        self.people[n].id
    }

    pub fn details(&self) -> EngagementDetails {
        EngagementDetails {
            title: "Community health fair".into(),
            kind: EngagementKind::Opportunity,
            scheduled_at: Some(start() + Duration::days(2)),
            location: "Civic center".into(),
            content_type: "volunteering".into(),
            capacity: None,
            template_id: Some(TemplateId::new("volunteer-cert").unwrap()),
        }
    }

    /// Created and published engagement.
    pub async fn upcoming(&self) -> EngagementId {
        let view = self.workflow.create_engagement(self.details()).await.unwrap();
        let id = view.engagement.id;
        self.workflow.publish(id).await.unwrap();
        id
    }

    /// Invitation id for participant `n`, inviting them first.
    pub async fn invitation(&self, engagement_id: EngagementId, n: usize) -> InvitationId {
        let participant_id = self.participant(n);
        self.workflow
            .invite(engagement_id, [participant_id])
            .await
            .unwrap();

        let view = self.workflow.list_invitations(engagement_id).await.unwrap();
        view.accepted
            .iter()
            .chain(&view.excused)
            .chain(&view.not_responded)
            .find(|i| i.participant_id == participant_id)
            .map(|i| i.id)
            .expect("invitation for participant")
    }
}
