//! Application state for locator-server

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::db::{BoxError, PgStoreRepository, StoreRepository};
use crate::ingest::StagingArea;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store persistence
    pub stores: Arc<dyn StoreRepository>,
    /// Where uploads are written before parsing
    pub staging: StagingArea,
    /// Request body limit
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Connect the store database, apply migrations and prepare the staging
    /// directory
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_pool_size)
            .connect_with(config.connect_options()?)
            .await?;
        tracing::info!(
            pool_size = config.db_pool_size,
            "Connected to PostgreSQL"
        );

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let staging = StagingArea::new(&config.upload_dir);
        staging.ensure().await?;

        Ok(Self::with_repository(
            Arc::new(PgStoreRepository::new(pool)),
            staging,
            config.max_upload_bytes,
        ))
    }

    /// Assemble state around an existing repository
    pub fn with_repository(
        stores: Arc<dyn StoreRepository>,
        staging: StagingArea,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            stores,
            staging,
            max_upload_bytes,
        }
    }
}
