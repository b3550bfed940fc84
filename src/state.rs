use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::db::{SessionManager, SessionStrategy};

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let sessions = SessionManager::new(SessionStrategy::Pooled {
            database_url: config.database_url.clone(),
        });
        sessions
            .initialize()
            .await
            .context("initialize database")?;
        Ok(Self { sessions, config })
    }

    pub fn from_parts(sessions: SessionManager, config: Arc<AppConfig>) -> Self {
        Self { sessions, config }
    }
}
