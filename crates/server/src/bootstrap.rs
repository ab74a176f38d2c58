use std::sync::Arc;

use chrono::Duration;
use concierge_agent::runtime::AgentRuntime;
use concierge_agent::session::{EvictionPolicy, InMemorySessionStore};
use concierge_core::config::{AppConfig, ConfigError, LoadOptions};
use concierge_core::Catalog;
use thiserror::Error;
use tracing::info;

use crate::generative;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("generative client construction failed: {0}")]
    Generative(#[source] anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    // Soft-fail: a missing menu leaves the agent answering, if uselessly.
    let catalog = Arc::new(Catalog::load_first_available(&config.catalog.paths));
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        item_count = catalog.len(),
        "catalog initialized"
    );

    let generative =
        generative::client_from_config(&config.llm).map_err(BootstrapError::Generative)?;
    info!(
        event_name = "system.bootstrap.llm_selected",
        provider = ?config.llm.provider,
        "generative backend configured"
    );

    let sessions = Arc::new(InMemorySessionStore::new(EvictionPolicy {
        max_sessions: config.session.max_sessions,
        ttl: Duration::seconds(config.session.ttl_secs as i64),
    }));

    let runtime = Arc::new(AgentRuntime::new(catalog.clone(), sessions, Some(generative)));

    Ok(Application { config, catalog, runtime })
}
