//! Certificate renderer that mints document links.
//!
//! Documents themselves are produced by a separate rendering service that
//! serves them under `{base}/{template}/{engagement}/{participant}.pdf`.

use async_trait::async_trait;
use engagements::{
    CertificateRenderer, DocumentRef, Engagement, EngagementError, ParticipantProfile, TemplateId,
};

pub struct LinkRenderer {
    base_url: String,
}

impl LinkRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CertificateRenderer for LinkRenderer {
    async fn render(
        &self,
        template_id: &TemplateId,
        participant: &ParticipantProfile,
        engagement: &Engagement,
    ) -> engagements::Result<DocumentRef> {
        if self.base_url.is_empty() {
            return Err(EngagementError::InvalidArgument(
                "certificate base url is empty".into(),
            ));
        }
        DocumentRef::new(format!(
            "{}/{}/{}/{}.pdf",
            self.base_url, template_id, engagement.id, participant.id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use engagements::lifecycle::engagements::create;
    use engagements::testing::participant;
    use engagements::{EngagementDetails, EngagementKind};

    fn engagement() -> Engagement {
        let details = EngagementDetails {
            title: "Alumni mixer".into(),
            kind: EngagementKind::Opportunity,
            scheduled_at: None,
            location: String::new(),
            content_type: String::new(),
            capacity: None,
            template_id: None,
        };
        create(details, Utc::now()).unwrap().engagement
    }

    #[tokio::test]
    async fn links_are_minted_under_the_base_url() {
        let renderer = LinkRenderer::new("https://docs.example.org/");
        let person = participant("Dana");
        let engagement = engagement();
        let template = TemplateId::new("mixer").unwrap();

        let document = renderer.render(&template, &person, &engagement).await.unwrap();

        assert_eq!(
            document.as_str(),
            format!(
                "https://docs.example.org/mixer/{}/{}.pdf",
                engagement.id, person.id
            )
        );
    }
}
