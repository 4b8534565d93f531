use std::sync::Arc;

use config::{Config, ConfigError};
use db::{DBService, DbInitError, default_database_url};
use thiserror::Error;
use tokio::sync::RwLock;
use workflow::WorkflowService;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] DbInitError),
    #[error("failed to resolve database path: {0}")]
    Path(#[from] std::io::Error),
}

/// Shared state handed to every route: the connection pool, the live config
/// and the workflow service built on top of the pool.
#[derive(Clone)]
pub struct Deployment {
    config: Arc<RwLock<Config>>,
    db: DBService,
    workflow: WorkflowService,
}

impl Deployment {
    pub async fn new() -> Result<Self, DeploymentError> {
        let config = config::load()?;
        let database_url = match config.database.url.clone() {
            Some(url) => url,
            None => default_database_url()?,
        };
        let db = DBService::new_with_url(&database_url).await?;
        Ok(Self::from_parts(config, db))
    }

    pub fn from_parts(config: Config, db: DBService) -> Self {
        let workflow = WorkflowService::new(db.pool.clone());
        Self {
            config: Arc::new(RwLock::new(config)),
            db,
            workflow,
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.config
    }

    pub fn workflow(&self) -> &WorkflowService {
        &self.workflow
    }
}
