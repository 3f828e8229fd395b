//! Application state - shared across all handlers.

use std::sync::Arc;

use baan_core::ports::{MediaStore, PostRepository, UserRepository};
use baan_infra::database::{
    DatabaseConnections, InMemoryPostRepository, InMemoryUserRepository, PostgresPostRepository,
    PostgresUserRepository,
};
use baan_infra::media::{HttpMediaStore, InMemoryMediaStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaStore>,
    /// Whether post reads are served without a session.
    pub public_reads: bool,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) =
            match &config.database {
                Some(db_config) => match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let users = Arc::new(PostgresUserRepository::new(connections.main.clone()));
                        let posts = Arc::new(PostgresPostRepository::new(connections.main.clone()));
                        (users, posts)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory stores.",
                            e
                        );
                        Self::memory_repos()
                    }
                },
                None => {
                    tracing::warn!("DATABASE_URL not set. Running with in-memory stores.");
                    Self::memory_repos()
                }
            };

        let media: Arc<dyn MediaStore> = match &config.media {
            Some(media_config) => Arc::new(HttpMediaStore::new(media_config.clone())),
            None => {
                tracing::warn!("MEDIA_UPLOAD_URL not set. Uploads are kept in memory.");
                Arc::new(InMemoryMediaStore::new())
            }
        };

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            media,
            public_reads: config.public_reads,
        }
    }

    fn memory_repos() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        (users, posts)
    }
}
