//! The engagement workflow: single entry point for admin and participant
//! actions.
//!
//! ```text
//! Draft -> Upcoming -> responses (NotResponded -> Accepted | Excused)
//!       -> date passes -> attendance marked -> confirm (lock)
//!       -> generate (certificates) -> Completed
//! ```
//!
//! Cancel is reachable until the engagement completes and is terminal.
//!
//! Every mutation goes through [`EngagementStore::update`], which holds the
//! engagement's lock for the duration of one lifecycle function. Directory
//! lookups and certificate rendering happen before or after that window,
//! never inside it.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{EngagementError, Result};
use crate::lifecycle::{attendance, certificates, engagements, excuses, invitations};
use crate::traits::{CertificateRenderer, Clock, EngagementStore, ParticipantDirectory, SystemClock};
use crate::types::{
    AttendanceRecord, AttendanceSummary, Certificate, DocumentRef, EngagementDetails,
    EngagementId, EngagementPatch, EngagementState, EngagementView, Invitation,
    InvitationBreakdown, InvitationId, ParticipantFilter, ParticipantId, TemplateId,
};

pub struct EngagementWorkflow {
    store: Arc<dyn EngagementStore>,
    directory: Arc<dyn ParticipantDirectory>,
    renderer: Arc<dyn CertificateRenderer>,
    clock: Arc<dyn Clock>,
}

impl EngagementWorkflow {
    pub fn new(
        store: Arc<dyn EngagementStore>,
        directory: Arc<dyn ParticipantDirectory>,
        renderer: Arc<dyn CertificateRenderer>,
    ) -> Self {
        Self {
            store,
            directory,
            renderer,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // =========================================================================
    // Engagements
    // =========================================================================

    #[instrument(skip(self, details), fields(title = %details.title, kind = ?details.kind))]
    pub async fn create_engagement(&self, details: EngagementDetails) -> Result<EngagementView> {
        let now = self.clock.now();
        let state = engagements::create(details, now)?;
        self.store.insert(&state).await?;

        info!(engagement_id = %state.engagement.id, "Engagement created");
        Ok(EngagementView::at(state.engagement, now))
    }

    pub async fn get_engagement(&self, id: EngagementId) -> Result<EngagementView> {
        let state = self.load(id).await?;
        Ok(EngagementView::at(state.engagement, self.clock.now()))
    }

    pub async fn list_engagements(&self) -> Result<Vec<EngagementView>> {
        let now = self.clock.now();
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(|e| EngagementView::at(e, now))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, id: EngagementId) -> Result<EngagementView> {
        let view = self
            .mutate(id, |state, now| {
                engagements::publish(state, now)?;
                Ok(EngagementView::at(state.engagement.clone(), now))
            })
            .await?;
        info!("Engagement published");
        Ok(view)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: EngagementId) -> Result<EngagementView> {
        let view = self
            .mutate(id, |state, now| {
                engagements::cancel(state, now)?;
                Ok(EngagementView::at(state.engagement.clone(), now))
            })
            .await?;
        info!("Engagement cancelled");
        Ok(view)
    }

    #[instrument(skip(self))]
    pub async fn set_template(
        &self,
        id: EngagementId,
        template_id: TemplateId,
    ) -> Result<EngagementView> {
        let view = self
            .mutate(id, move |state, now| {
                engagements::set_template(state, template_id, now)?;
                Ok(EngagementView::at(state.engagement.clone(), now))
            })
            .await?;
        info!("Certificate template set");
        Ok(view)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_details(
        &self,
        id: EngagementId,
        patch: EngagementPatch,
    ) -> Result<EngagementView> {
        let view = self
            .mutate(id, move |state, now| {
                engagements::update_details(state, patch, now)?;
                Ok(EngagementView::at(state.engagement.clone(), now))
            })
            .await?;
        info!("Engagement details updated");
        Ok(view)
    }

    // =========================================================================
    // Invitations
    // =========================================================================

    /// Invite participants by id. Every id must be known to the directory.
    ///
    /// Returns the number of new invitations; already-invited participants
    /// are skipped.
    #[instrument(skip(self, participant_ids))]
    pub async fn invite(
        &self,
        engagement_id: EngagementId,
        participant_ids: impl IntoIterator<Item = ParticipantId>,
    ) -> Result<usize> {
        let participants: BTreeSet<ParticipantId> = participant_ids.into_iter().collect();
        for id in &participants {
            if self.directory.get(*id).await?.is_none() {
                return Err(EngagementError::not_found("participant", id));
            }
        }
        self.invite_resolved(engagement_id, participants).await
    }

    /// Invite everyone the directory returns for `filter`.
    #[instrument(skip(self))]
    pub async fn invite_matching(
        &self,
        engagement_id: EngagementId,
        filter: &ParticipantFilter,
    ) -> Result<usize> {
        let participants: BTreeSet<ParticipantId> =
            self.directory.query(filter).await?.into_iter().collect();
        debug!(matched = participants.len(), "Resolved invitation targets");
        self.invite_resolved(engagement_id, participants).await
    }

    async fn invite_resolved(
        &self,
        engagement_id: EngagementId,
        participants: BTreeSet<ParticipantId>,
    ) -> Result<usize> {
        let requested = participants.len();
        let created = self
            .mutate(engagement_id, move |state, now| {
                invitations::invite(state, &participants, now)
            })
            .await?;

        if created == 0 {
            debug!(requested, "No new invitations; everyone already invited");
        } else {
            info!(requested, created, "Invitations created");
        }
        Ok(created)
    }

    pub async fn get_invitation(&self, invitation_id: InvitationId) -> Result<Invitation> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let state = self.load(engagement_id).await?;
        state.invitation(invitation_id).cloned()
    }

    pub async fn list_invitations(&self, engagement_id: EngagementId) -> Result<InvitationBreakdown> {
        let state = self.load(engagement_id).await?;
        Ok(invitations::breakdown(&state))
    }

    #[instrument(skip(self))]
    pub async fn respond_accept(&self, invitation_id: InvitationId) -> Result<Invitation> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let invitation = self
            .mutate(engagement_id, |state, now| {
                invitations::respond_accept(state, invitation_id, now)?;
                state.invitation(invitation_id).cloned()
            })
            .await?;
        info!(%engagement_id, "Invitation accepted");
        Ok(invitation)
    }

    #[instrument(skip(self, reason))]
    pub async fn respond_excuse(
        &self,
        invitation_id: InvitationId,
        reason: String,
        document_ref: Option<DocumentRef>,
    ) -> Result<Invitation> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let invitation = self
            .mutate(engagement_id, move |state, now| {
                invitations::respond_excuse(state, invitation_id, &reason, document_ref, now)?;
                state.invitation(invitation_id).cloned()
            })
            .await?;
        info!(%engagement_id, "Invitation excused");
        Ok(invitation)
    }

    // =========================================================================
    // Excuse review
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn approve_excuse(&self, invitation_id: InvitationId) -> Result<Invitation> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let invitation = self
            .mutate(engagement_id, |state, now| {
                excuses::approve_excuse(state, invitation_id, now)?;
                state.invitation(invitation_id).cloned()
            })
            .await?;
        info!(%engagement_id, "Excuse approved");
        Ok(invitation)
    }

    #[instrument(skip(self))]
    pub async fn reject_excuse(&self, invitation_id: InvitationId) -> Result<Invitation> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let invitation = self
            .mutate(engagement_id, |state, now| {
                excuses::reject_excuse(state, invitation_id, now)?;
                state.invitation(invitation_id).cloned()
            })
            .await?;
        info!(%engagement_id, "Excuse rejected");
        Ok(invitation)
    }

    // =========================================================================
    // Attendance
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn mark_attended(
        &self,
        invitation_id: InvitationId,
        attended: bool,
    ) -> Result<AttendanceRecord> {
        let engagement_id = self.engagement_of(invitation_id).await?;
        let record = self
            .mutate(engagement_id, |state, now| {
                attendance::mark_attended(state, invitation_id, attended, now)?;
                state
                    .attendance_for(invitation_id)
                    .cloned()
                    .ok_or_else(|| EngagementError::not_found("attendance record", invitation_id))
            })
            .await?;
        debug!(%engagement_id, "Attendance marked");
        Ok(record)
    }

    /// Lock attendance for good. Repeated calls are no-ops.
    #[instrument(skip(self))]
    pub async fn confirm_attendance(&self, engagement_id: EngagementId) -> Result<AttendanceSummary> {
        let (locked_now, summary) = self
            .mutate(engagement_id, |state, now| {
                let changed = attendance::confirm_attendance(state, now)?;
                Ok((changed, attendance::summary(state)))
            })
            .await?;

        if locked_now {
            info!(
                attended = summary.attended,
                absent = summary.absent,
                "Attendance confirmed and locked"
            );
        } else {
            debug!("Attendance already confirmed");
        }
        Ok(summary)
    }

    pub async fn attendance_summary(&self, engagement_id: EngagementId) -> Result<AttendanceSummary> {
        let state = self.load(engagement_id).await?;
        Ok(attendance::summary(&state))
    }

    // =========================================================================
    // Certificates
    // =========================================================================

    /// Issue the one-shot certificate batch.
    #[instrument(skip(self))]
    pub async fn generate_certificates(
        &self,
        engagement_id: EngagementId,
    ) -> Result<Vec<Certificate>> {
        let batch = self
            .mutate(engagement_id, |state, now| certificates::generate(state, now))
            .await?;
        info!(issued = batch.len(), "Certificates generated");
        Ok(batch)
    }

    pub async fn get_certificate(
        &self,
        engagement_id: EngagementId,
        participant_id: ParticipantId,
    ) -> Result<Certificate> {
        let state = self.load(engagement_id).await?;
        certificates::find(&state, participant_id).cloned()
    }

    pub async fn list_certificates(&self, engagement_id: EngagementId) -> Result<Vec<Certificate>> {
        Ok(self.load(engagement_id).await?.certificates)
    }

    /// Render every issued certificate that has no document yet.
    ///
    /// Rendering runs outside the engagement lock; the resulting references
    /// are attached afterwards in one update. Certificates that already have
    /// a document are left alone, so retrying after a failure is safe. When a
    /// render fails, documents rendered before it are still attached and the
    /// error is returned.
    #[instrument(skip(self))]
    pub async fn render_certificates(
        &self,
        engagement_id: EngagementId,
    ) -> Result<Vec<Certificate>> {
        let snapshot = self.load(engagement_id).await?;
        if !snapshot.engagement.certificates_issued {
            return Err(EngagementError::invalid_state(
                "certificates have not been issued",
            ));
        }

        let mut rendered = Vec::new();
        let mut failure = None;
        for certificate in snapshot.certificates.iter().filter(|c| c.document_ref.is_none()) {
            match self.render_one(certificate, &snapshot).await {
                Ok(document) => rendered.push((certificate.id, document)),
                Err(err) => {
                    warn!(
                        participant_id = %certificate.participant_id,
                        error = %err,
                        "Certificate render failed"
                    );
                    failure = Some(err);
                    break;
                }
            }
        }

        if rendered.is_empty() {
            return match failure {
                Some(err) => Err(err),
                None => {
                    debug!("All certificates already rendered");
                    Ok(snapshot.certificates)
                }
            };
        }

        let count = rendered.len();
        let certificates = self
            .mutate(engagement_id, move |state, _now| {
                for (certificate_id, document) in rendered {
                    certificates::attach_document(state, certificate_id, document)?;
                }
                Ok(state.certificates.clone())
            })
            .await?;
        info!(rendered = count, "Certificates rendered");

        match failure {
            Some(err) => Err(err),
            None => Ok(certificates),
        }
    }

    async fn render_one(
        &self,
        certificate: &Certificate,
        snapshot: &EngagementState,
    ) -> Result<DocumentRef> {
        let participant = self
            .directory
            .get(certificate.participant_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("participant", certificate.participant_id))?;
        self.renderer
            .render(&certificate.template_id, &participant, &snapshot.engagement)
            .await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load(&self, id: EngagementId) -> Result<EngagementState> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| EngagementError::not_found("engagement", id))
    }

    async fn engagement_of(&self, invitation_id: InvitationId) -> Result<EngagementId> {
        self.store
            .locate_invitation(invitation_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("invitation", invitation_id))
    }

    /// Run one lifecycle function under the engagement's lock.
    async fn mutate<T, F>(&self, id: EngagementId, op: F) -> Result<T>
    where
        F: FnOnce(&mut EngagementState, DateTime<Utc>) -> Result<T> + Send,
        T: Send,
    {
        let now = self.clock.now();
        let mut op = Some(op);
        let mut output = None;

        self.store
            .update(id, &mut |state: &mut EngagementState| {
                let op = op
                    .take()
                    .ok_or_else(|| EngagementError::storage("update applied more than once"))?;
                output = Some(op(state, now)?);
                Ok(())
            })
            .await?;

        output.ok_or_else(|| EngagementError::storage("store committed without applying update"))
    }
}
