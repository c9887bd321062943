//! Test harness for HTTP integration tests.
//!
//! Each test gets a fresh in-memory workflow behind the real router, a manual
//! clock, and a mock renderer. Requests go through `tower::ServiceExt::oneshot`
//! without binding a socket.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use engagements::testing::{participant, ManualClock, MockRenderer};
use engagements::{
    EngagementWorkflow, MemoryStore, ParticipantId, ParticipantProfile, StaticDirectory,
};
use serde_json::{json, Value};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tower::ServiceExt;

pub struct TestHarness {
    pub router: Router,
    pub clock: ManualClock,
    pub renderer: MockRenderer,
    pub people: Vec<ParticipantProfile>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // Memory store is dropped with the router
    }
}

impl TestHarness {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let people = vec![
            with_country(participant("Amara Okafor"), "Nigeria"),
            with_country(participant("Bilal Haddad"), "Jordan"),
            with_country(participant("Chen Wei"), "Nigeria"),
        ];
        let clock = ManualClock::new(start());
        let renderer = MockRenderer::new();

        let workflow = EngagementWorkflow::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticDirectory::new(people.clone())),
            Arc::new(renderer.clone()),
        )
        .with_clock(Arc::new(clock.clone()));

        let router = build_app(ServerDeps::new(Arc::new(workflow), None));

        Self {
            router,
            clock,
            renderer,
            people,
        }
    }

    pub fn participant(&self, n: usize) -> ParticipantId {
        self.people[n].id
    }

    /// Send one request and decode the JSON response body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Create and publish an engagement two days out; returns its id.
    pub async fn upcoming(&self) -> String {
        let (status, body) = self
            .post(
                "/engagements",
                json!({
                    "title": "Leadership workshop",
                    "kind": "program",
                    "scheduled_at": start() + Duration::days(2),
                    "location": "Main hall",
                    "content_type": "workshop",
                    "template_id": "leadership-2026",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = self.post(&format!("/engagements/{}/publish", id), json!({})).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        id
    }

    /// Invite participant `n` and return the invitation id.
    pub async fn invitation(&self, engagement_id: &str, n: usize) -> String {
        let participant_id = self.participant(n).to_string();
        let (status, body) = self
            .post(
                &format!("/engagements/{}/invitations", engagement_id),
                json!({ "participant_ids": [participant_id] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);

        let (_, breakdown) = self
            .get(&format!("/engagements/{}/invitations", engagement_id))
            .await;
        ["accepted", "excused", "not_responded"]
            .iter()
            .flat_map(|bucket| breakdown[*bucket].as_array().cloned().unwrap_or_default())
            .find(|invitation| invitation["participant_id"] == participant_id.as_str())
            .and_then(|invitation| invitation["id"].as_str().map(str::to_string))
            .expect("invitation for participant")
    }
}

fn with_country(mut profile: ParticipantProfile, country: &str) -> ParticipantProfile {
    profile.country = Some(country.to_string());
    profile
}
