//! Certificate issuance.
//!
//! `generate` is a single batch per engagement: all eligible certificates
//! are built first and written together with the `certificates_issued` flag.

use chrono::{DateTime, Utc};

use crate::error::{EngagementError, Result};
use crate::types::{
    Certificate, CertificateId, DocumentRef, EngagementState, ParticipantId,
};

/// Issue one certificate per participant marked attended.
///
/// Requires confirmed attendance, a template, and no earlier batch.
/// Participants not marked attended are skipped.
pub fn generate(state: &mut EngagementState, now: DateTime<Utc>) -> Result<Vec<Certificate>> {
    state.ensure_not_cancelled()?;
    let engagement = &state.engagement;

    if !engagement.attendance_confirmed {
        return Err(EngagementError::invalid_state(
            "attendance has not been confirmed",
        ));
    }
    let Some(template_id) = engagement.template_id.clone() else {
        return Err(EngagementError::invalid_state(
            "no certificate template is set",
        ));
    };
    if engagement.certificates_issued {
        return Err(EngagementError::invalid_state(
            "certificates have already been issued",
        ));
    }

    let batch: Vec<Certificate> = state
        .attendance
        .iter()
        .filter(|r| r.attended)
        .map(|r| Certificate {
            id: CertificateId::new(),
            engagement_id: engagement.id,
            participant_id: r.participant_id,
            template_id: template_id.clone(),
            issued_at: now,
            document_ref: None,
        })
        .collect();

    state.certificates.extend(batch.iter().cloned());
    state.engagement.certificates_issued = true;
    state.engagement.updated_at = now;
    Ok(batch)
}

/// Lookup of a participant's certificate. Never regenerates.
pub fn find(state: &EngagementState, participant_id: ParticipantId) -> Result<&Certificate> {
    state
        .certificates
        .iter()
        .find(|c| c.participant_id == participant_id)
        .ok_or_else(|| EngagementError::not_found("certificate", participant_id))
}

/// Record the rendered document. Returns `false` if one was already attached.
pub fn attach_document(
    state: &mut EngagementState,
    certificate_id: CertificateId,
    document_ref: DocumentRef,
) -> Result<bool> {
    let certificate = state
        .certificates
        .iter_mut()
        .find(|c| c.id == certificate_id)
        .ok_or_else(|| EngagementError::not_found("certificate", certificate_id))?;

    if certificate.document_ref.is_some() {
        return Ok(false);
    }
    certificate.document_ref = Some(document_ref);
    Ok(true)
}
