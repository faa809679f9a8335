//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use blogicum_core::ports::{
    CategoryRepository, Clock, LocationRepository, SystemClock, UserRepository,
};
use blogicum_core::service::{CommentService, PostService, ProfileService, Repositories};
use blogicum_infra::InMemoryStore;
use blogicum_infra::database::DatabaseConfig;

#[cfg(feature = "postgres")]
use blogicum_infra::DatabaseConnections;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub profiles: Arc<ProfileService>,
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    /// Which entity store backs the repositories.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// The in-memory store is used only when no database is configured; a
    /// configured database that cannot be opened is a startup error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> io::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let state = match db_config {
            Some(config) => Self::postgres(config, clock).await?,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(InMemoryStore::new(), clock)
            }
        };

        tracing::info!(backend = state.backend, "Application state initialized");
        Ok(state)
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig, clock: Arc<dyn Clock>) -> io::Result<Self> {
        let connections = DatabaseConnections::init(config).await.map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            io::Error::other(format!("database unavailable: {e}"))
        })?;

        Ok(Self::build(connections.repositories(), clock, "postgres"))
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres(_config: &DatabaseConfig, _clock: Arc<dyn Clock>) -> io::Result<Self> {
        tracing::error!("DATABASE_URL is set but the server was built without postgres support");
        Err(io::Error::other("postgres feature disabled"))
    }

    /// State over an in-memory store.
    pub fn in_memory(store: InMemoryStore, clock: Arc<dyn Clock>) -> Self {
        Self::build(store.repositories(), clock, "memory")
    }

    fn build(repos: Repositories, clock: Arc<dyn Clock>, backend: &'static str) -> Self {
        Self {
            posts: Arc::new(PostService::new(repos.clone(), clock.clone())),
            comments: Arc::new(CommentService::new(repos.clone(), clock.clone())),
            profiles: Arc::new(ProfileService::new(repos.clone(), clock)),
            users: repos.users,
            categories: repos.categories,
            locations: repos.locations,
            backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_unreachable_database_aborts_startup() {
        let config = DatabaseConfig {
            url: "unsupported://nowhere/blogicum".to_string(),
            max_connections: 1,
            min_connections: 0,
        };

        assert!(AppState::new(Some(&config)).await.is_err());
    }

    #[actix_web::test]
    async fn test_missing_database_uses_memory_store() {
        let state = AppState::new(None).await.unwrap();

        assert_eq!(state.backend, "memory");
    }
}
