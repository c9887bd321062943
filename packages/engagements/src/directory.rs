//! In-process participant directory.
//!
//! Holds participant profiles in memory, optionally loaded from a JSON file
//! (an array of [`ParticipantProfile`]). Suitable when the real directory is
//! exported periodically rather than queried live.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

use crate::error::{EngagementError, Result};
use crate::traits::directory::ParticipantDirectory;
use crate::types::{ParticipantFilter, ParticipantId, ParticipantProfile};

#[derive(Default)]
pub struct StaticDirectory {
    profiles: RwLock<HashMap<ParticipantId, ParticipantProfile>>,
}

impl StaticDirectory {
    pub fn new(profiles: impl IntoIterator<Item = ParticipantProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Load profiles from a JSON array on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngagementError::Storage(
                format!("failed to read participants file {}: {}", path.display(), e).into(),
            )
        })?;
        let profiles: Vec<ParticipantProfile> = serde_json::from_str(&raw)?;
        info!(count = profiles.len(), path = %path.display(), "Loaded participant directory");
        Ok(Self::new(profiles))
    }

    /// Add or replace a profile.
    pub fn upsert(&self, profile: ParticipantProfile) -> Result<()> {
        let mut profiles = self.profiles.write().map_err(|_| poisoned())?;
        profiles.insert(profile.id, profile);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> EngagementError {
    EngagementError::storage("participant directory lock poisoned")
}

#[async_trait]
impl ParticipantDirectory for StaticDirectory {
    async fn query(&self, filter: &ParticipantFilter) -> Result<Vec<ParticipantId>> {
        let profiles = self.profiles.read().map_err(|_| poisoned())?;
        let mut ids: Vec<ParticipantId> = profiles
            .values()
            .filter(|p| filter.matches(p))
            .map(|p| p.id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn get(&self, id: ParticipantId) -> Result<Option<ParticipantProfile>> {
        let profiles = self.profiles.read().map_err(|_| poisoned())?;
        Ok(profiles.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, country: &str) -> ParticipantProfile {
        ParticipantProfile {
            id: ParticipantId::new(),
            name: name.into(),
            country: Some(country.into()),
            university: None,
            scholarship: None,
            specialization: None,
        }
    }

    #[tokio::test]
    async fn query_applies_the_filter() {
        let ghana = profile("Kwame Mensah", "Ghana");
        let peru = profile("Lucia Quispe", "Peru");
        let directory = StaticDirectory::new([ghana.clone(), peru]);

        let filter = ParticipantFilter {
            country: Some("ghana".into()),
            ..Default::default()
        };
        assert_eq!(directory.query(&filter).await.unwrap(), vec![ghana.id]);
    }

    #[tokio::test]
    async fn loads_profiles_from_json() {
        let p = profile("Sara Haile", "Ethiopia");
        let path = std::env::temp_dir().join(format!("participants-{}.json", p.id));
        std::fs::write(&path, serde_json::to_string(&vec![p.clone()]).unwrap()).unwrap();

        let directory = StaticDirectory::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(directory.get(p.id).await.unwrap(), Some(p));
    }
}
