//! Application state - shared across all handlers.

use std::sync::Arc;

use recyclehub_core::ports::{
    ListingRepository, MediaError, MediaStore, PasswordService, TokenService, UserRepository,
};
use recyclehub_core::services::{ActorResolution, ListingService, UserService};
use recyclehub_infra::{
    Argon2PasswordService, InMemoryListingRepository, InMemoryUserRepository, JwtTokenService,
    LocalMediaStore,
};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Upload directory unavailable: {0}")]
    Media(#[from] MediaError),

    #[error("Database migration failed: {0}")]
    Migration(String),
}

type Repositories = (Arc<dyn ListingRepository>, Arc<dyn UserRepository>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StateError> {
        let (listings, users) = repositories(config).await?;
        let media = Arc::new(LocalMediaStore::init(&config.upload_dir).await?);
        let tokens = Arc::new(JwtTokenService::from_env());

        if config.actor_resolution == ActorResolution::ClientSupplied {
            tracing::warn!(
                "ACTOR_RESOLUTION=client: listing owners come from client-sent user_id and \
                 mutations are not authorized. Do not expose this server publicly."
            );
        }

        tracing::info!(policy = %config.actor_resolution, "Application state initialized");

        Ok(Self::assemble(
            listings,
            users,
            media,
            tokens,
            Arc::new(Argon2PasswordService::new()),
            config.actor_resolution,
        ))
    }

    /// Wire services from already-built adapters.
    pub fn assemble(
        listings: Arc<dyn ListingRepository>,
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        policy: ActorResolution,
    ) -> Self {
        Self {
            listings: Arc::new(ListingService::new(listings, users.clone(), media, policy)),
            users: Arc::new(UserService::new(users, passwords, tokens.clone())),
            tokens,
        }
    }
}

fn in_memory() -> Repositories {
    (
        Arc::new(InMemoryListingRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

#[cfg(feature = "database")]
async fn repositories(config: &AppConfig) -> Result<Repositories, StateError> {
    use migration::{Migrator, MigratorTrait};
    use recyclehub_infra::{ConnectionPool, SeaListingRepository, SeaUserRepository};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok(in_memory());
    };

    let pool = match ConnectionPool::connect(db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            return Ok(in_memory());
        }
    };

    if config.auto_migrate {
        Migrator::up(&pool.conn, None)
            .await
            .map_err(|e| StateError::Migration(e.to_string()))?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(SeaListingRepository::new(pool.conn.clone())),
        Arc::new(SeaUserRepository::new(pool.conn)),
    ))
}

#[cfg(not(feature = "database"))]
async fn repositories(_config: &AppConfig) -> Result<Repositories, StateError> {
    tracing::info!("Running without database feature - using in-memory repositories");
    Ok(in_memory())
}
