//! Server dependencies shared by every request handler.
//!
//! The storage backend follows configuration: Postgres when `DATABASE_URL` is
//! set, the in-memory store otherwise.

use anyhow::{Context, Result};
use engagements::{
    EngagementStore, EngagementWorkflow, MemoryStore, ParticipantDirectory, PostgresStore,
    StaticDirectory,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::renderer::LinkRenderer;

#[derive(Clone)]
pub struct ServerDeps {
    pub workflow: Arc<EngagementWorkflow>,
    /// Present only for the Postgres backend; used by the health check.
    pub db_pool: Option<PgPool>,
}

impl ServerDeps {
    pub fn new(workflow: Arc<EngagementWorkflow>, db_pool: Option<PgPool>) -> Self {
        Self { workflow, db_pool }
    }

    /// Wire the workflow from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let directory: Arc<dyn ParticipantDirectory> = match &config.participants_file {
            Some(path) => Arc::new(
                StaticDirectory::from_json_file(path)
                    .context("Failed to load participants file")?,
            ),
            None => {
                tracing::warn!("PARTICIPANTS_FILE not set; participant directory is empty");
                Arc::new(StaticDirectory::default())
            }
        };

        let (store, db_pool): (Arc<dyn EngagementStore>, Option<PgPool>) =
            match &config.database_url {
                Some(url) => {
                    tracing::info!("Connecting to database...");
                    let store = PostgresStore::new(url)
                        .await
                        .context("Failed to connect to database")?;
                    tracing::info!("Database connected");
                    let pool = store.pool().clone();
                    let store: Arc<dyn EngagementStore> = Arc::new(store);
                    (store, Some(pool))
                }
                None => {
                    tracing::warn!("DATABASE_URL not set; engagements are kept in memory");
                    let store: Arc<dyn EngagementStore> = Arc::new(MemoryStore::new());
                    (store, None)
                }
            };

        let renderer = Arc::new(LinkRenderer::new(config.certificate_base_url.clone()));
        let workflow = EngagementWorkflow::new(store, directory, renderer);

        Ok(Self::new(Arc::new(workflow), db_pool))
    }
}
