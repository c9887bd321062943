use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EngagementId, TemplateId};

/// Which kind of activity an engagement is. Both kinds share one lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Program,
    Opportunity,
}

/// Lifecycle position as seen from outside.
///
/// Never stored: derived from `scheduled_at`, the clock, and the explicit
/// draft/cancelled/confirmed flags on [`Engagement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    Draft,
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

/// Metadata supplied when an admin creates an engagement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementDetails {
    pub title: String,
    pub kind: EngagementKind,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
}

/// Partial update of an engagement's descriptive fields.
///
/// `None` leaves a field untouched. `capacity: Some(None)` clears the limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, with = "double_option")]
    pub capacity: Option<Option<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: EngagementId,
    pub title: String,
    pub kind: EngagementKind,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: String,
    pub content_type: String,
    pub capacity: Option<u32>,
    pub template_id: Option<TemplateId>,

    // Explicit lifecycle flags; everything else is derived
    pub published_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub attendance_confirmed: bool,
    pub certificates_issued: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Engagement {
    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    /// Whether `scheduled_at` is set and lies at or before `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at.is_some_and(|at| at <= now)
    }

    /// Derive the externally visible status at `now`.
    ///
    /// Cancelled and Draft are explicit. Completed needs both the date to have
    /// passed and attendance to be confirmed; otherwise the schedule decides
    /// between Upcoming and Ongoing.
    pub fn status(&self, now: DateTime<Utc>) -> EngagementStatus {
        if self.is_cancelled() {
            EngagementStatus::Cancelled
        } else if self.is_draft() {
            EngagementStatus::Draft
        } else if !self.has_started(now) {
            EngagementStatus::Upcoming
        } else if self.attendance_confirmed {
            EngagementStatus::Completed
        } else {
            EngagementStatus::Ongoing
        }
    }
}

/// Engagement plus its status at read time. This is what callers see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementView {
    #[serde(flatten)]
    pub engagement: Engagement,
    pub status: EngagementStatus,
}

impl EngagementView {
    pub fn at(engagement: Engagement, now: DateTime<Utc>) -> Self {
        let status = engagement.status(now);
        Self { engagement, status }
    }
}

/// Distinguishes an absent JSON field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
