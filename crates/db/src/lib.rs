use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use utils::assets::database_path;

pub mod entities;
pub mod events;
pub mod models;
pub mod types;

pub use sea_orm::{DatabaseConnection as DbPool, DbErr, TransactionTrait};

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("failed to resolve database path: {0}")]
    Path(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct DBService {
    pub pool: DbPool,
}

/// Default sqlite URL inside the asset directory, created on first connect.
pub fn default_database_url() -> Result<String, std::io::Error> {
    Ok(format!(
        "sqlite://{}?mode=rwc",
        database_path()?.to_string_lossy()
    ))
}

impl DBService {
    /// Connects to `database_url` and brings the schema up to date.
    pub async fn new_with_url(database_url: &str) -> Result<DBService, DbInitError> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options.sqlx_logging(false);
        let pool = Database::connect(options).await?;
        db_migration::Migrator::up(&pool, None).await?;
        tracing::debug!("database ready at {}", redact_url(database_url));
        Ok(DBService { pool })
    }
}

fn redact_url(url: &str) -> String {
    match url.split_once('@') {
        Some((scheme_and_credentials, host)) => {
            let scheme = scheme_and_credentials
                .split_once("://")
                .map(|(scheme, _)| scheme)
                .unwrap_or("db");
            format!("{scheme}://***@{host}")
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_db {
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    pub async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db_migration::Migrator::up(&db, None).await.unwrap();
        db
    }
}
