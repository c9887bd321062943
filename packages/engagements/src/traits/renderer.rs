//! Certificate rendering trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DocumentRef, Engagement, ParticipantProfile, TemplateId};

/// Turns an issued certificate into a stored document.
///
/// Called outside any engagement lock, after certificates have been issued.
#[async_trait]
pub trait CertificateRenderer: Send + Sync {
    async fn render(
        &self,
        template_id: &TemplateId,
        participant: &ParticipantProfile,
        engagement: &Engagement,
    ) -> Result<DocumentRef>;
}
