use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;

/// Profile attributes the directory exposes for targeting and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub scholarship: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

/// Invitation targeting filter.
///
/// Every populated field must match. Comparisons ignore case; `name` matches
/// as a substring, the other fields must be equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub scholarship: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl ParticipantFilter {
    pub fn matches(&self, profile: &ParticipantProfile) -> bool {
        let name_matches = self.name.as_deref().map_or(true, |needle| {
            profile
                .name
                .to_lowercase()
                .contains(&needle.trim().to_lowercase())
        });

        name_matches
            && field_matches(&self.country, &profile.country)
            && field_matches(&self.university, &profile.university)
            && field_matches(&self.scholarship, &profile.scholarship)
            && field_matches(&self.specialization, &profile.specialization)
    }
}

fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(wanted), Some(actual)) => {
            wanted.trim().to_lowercase() == actual.trim().to_lowercase()
        }
        (Some(_), None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ParticipantProfile {
        ParticipantProfile {
            id: ParticipantId::new(),
            name: "Amina Yusuf".into(),
            country: Some("Kenya".into()),
            university: Some("University of Nairobi".into()),
            scholarship: Some("Global Leaders".into()),
            specialization: Some("Civil Engineering".into()),
        }
    }

    #[test]
    fn empty_filter_matches_everyone() {
        assert!(ParticipantFilter::default().matches(&profile()));
    }

    #[test]
    fn name_is_a_case_insensitive_substring() {
        let filter = ParticipantFilter {
            name: Some("yusuf".into()),
            ..Default::default()
        };
        assert!(filter.matches(&profile()));
    }

    #[test]
    fn every_populated_field_must_match() {
        let filter = ParticipantFilter {
            country: Some("kenya".into()),
            specialization: Some("Medicine".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&profile()));
    }

    #[test]
    fn missing_profile_attribute_never_matches() {
        let mut p = profile();
        p.university = None;
        let filter = ParticipantFilter {
            university: Some("University of Nairobi".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&p));
    }
}
